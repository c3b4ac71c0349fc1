use crate::registry::AliasRegistry;
use jiff::Timestamp;
use std::fmt::Display;
use std::str::FromStr;
use warren_core::{AliasRecord, Clock, RecordStatus, Store};
use warren_generator::Generator;

/// Which rows a dashboard shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Expired,
}

impl StatusFilter {
    pub fn matches(self, status: RecordStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == RecordStatus::Active,
            StatusFilter::Expired => status == RecordStatus::Expired,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "expired" => Ok(StatusFilter::Expired),
            other => Err(format!("unknown status filter: '{other}'")),
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Active => f.write_str("active"),
            StatusFilter::Expired => f.write_str("expired"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRow {
    pub record: AliasRecord,
    pub status: RecordStatus,
}

/// A point-in-time listing of aliases, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub rows: Vec<DashboardRow>,
    pub total: usize,
    pub active: usize,
    pub expired: usize,
}

impl Dashboard {
    /// Sorts `records` by creation time (newest first), derives each status at
    /// `now`, and keeps the rows matching `filter`. Counts cover all records.
    pub fn build(mut records: Vec<AliasRecord>, now: Timestamp, filter: StatusFilter) -> Self {
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let rows: Vec<DashboardRow> = records
            .into_iter()
            .map(|record| DashboardRow {
                status: record.status_at(now),
                record,
            })
            .collect();

        let total = rows.len();
        let expired = rows
            .iter()
            .filter(|row| row.status == RecordStatus::Expired)
            .count();

        Self {
            rows: rows
                .into_iter()
                .filter(|row| filter.matches(row.status))
                .collect(),
            total,
            active: total - expired,
            expired,
        }
    }
}

impl<S: Store, G: Generator, C: Clock> AliasRegistry<S, G, C> {
    /// Builds a [`Dashboard`] of every record as of the registry's clock.
    pub async fn dashboard(&self, filter: StatusFilter) -> Dashboard {
        Dashboard::build(self.list().await, self.now(), filter)
    }
}
