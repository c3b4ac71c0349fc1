use crate::error::ValidationError;
use crate::shortcode::ShortCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Where a click came from. Supplied by the caller and stored as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Caller-provided context for a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickContext {
    pub referrer: String,
    pub location: Location,
}

impl ClickContext {
    /// A click with no referrer and unknown location.
    pub fn direct() -> Self {
        Self {
            referrer: "direct".to_string(),
            location: Location::default(),
        }
    }
}

impl Default for ClickContext {
    fn default() -> Self {
        Self::direct()
    }
}

/// One recorded access of an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub ts: Timestamp,
    pub referrer: String,
    pub location: Location,
}

/// Access analytics of a single alias.
///
/// `clicks` always equals `events.len()`; the only mutation path is
/// [`AliasRecord::record_click`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    clicks: u64,
    last_accessed: Option<Timestamp>,
    events: Vec<ClickEvent>,
}

impl Analytics {
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn last_accessed(&self) -> Option<Timestamp> {
        self.last_accessed
    }

    pub fn events(&self) -> &[ClickEvent] {
        &self.events
    }
}

/// Derived lifecycle status of a record at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Active,
    Expired,
}

impl Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStatus::Active => f.write_str("active"),
            RecordStatus::Expired => f.write_str("expired"),
        }
    }
}

/// A stored alias: a short code, its destination and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasRecord {
    shortcode: ShortCode,
    long_url: String,
    created_at: Timestamp,
    expiry_minutes: u32,
    expiry_at: Timestamp,
    #[serde(default)]
    analytics: Analytics,
}

impl AliasRecord {
    /// Builds a fresh record with empty analytics.
    ///
    /// `expiry_at` is fixed here to `created_at + expiry_minutes` and never
    /// recomputed afterwards.
    pub fn new(
        shortcode: ShortCode,
        long_url: impl Into<String>,
        created_at: Timestamp,
        expiry_minutes: u32,
    ) -> Result<Self, ValidationError> {
        let expiry_at = created_at
            .checked_add(SignedDuration::from_mins(i64::from(expiry_minutes)))
            .map_err(|e| ValidationError::InvalidExpiry(format!("expiry out of range: {e}")))?;

        Ok(Self {
            shortcode,
            long_url: long_url.into(),
            created_at,
            expiry_minutes,
            expiry_at,
            analytics: Analytics::default(),
        })
    }

    pub fn shortcode(&self) -> &ShortCode {
        &self.shortcode
    }

    pub fn long_url(&self) -> &str {
        &self.long_url
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn expiry_minutes(&self) -> u32 {
        self.expiry_minutes
    }

    pub fn expiry_at(&self) -> Timestamp {
        self.expiry_at
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// A record is expired strictly after its `expiry_at`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expiry_at
    }

    pub fn status_at(&self, now: Timestamp) -> RecordStatus {
        if self.is_expired_at(now) {
            RecordStatus::Expired
        } else {
            RecordStatus::Active
        }
    }

    /// Appends one click event and bumps the counters.
    pub fn record_click(&mut self, ts: Timestamp, context: ClickContext) {
        let analytics = &mut self.analytics;
        analytics.events.push(ClickEvent {
            ts,
            referrer: context.referrer,
            location: context.location,
        });
        analytics.clicks = analytics.events.len() as u64;
        analytics.last_accessed = Some(ts);
    }
}
