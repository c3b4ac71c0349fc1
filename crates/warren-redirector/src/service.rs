use std::sync::Arc;

use crate::redirector::{Redirector, Resolution};
use async_trait::async_trait;
use tracing::{info, trace, warn};
use warren_core::{ClickContext, Clock, Store};
use warren_storage::{Commit, Table};

/// Resolves short codes and records click analytics.
///
/// Shares its [`Table`] with the registry, so the expiry check and the click
/// update of one resolution happen inside a single table transaction.
pub struct ResolutionEngine<S, C> {
    table: Table<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for ResolutionEngine<S, C> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: Store, C: Clock> ResolutionEngine<S, C> {
    /// Creates a new ResolutionEngine over the given table.
    pub fn new(table: Table<S>, clock: C) -> Self {
        Self {
            table,
            clock: Arc::new(clock),
        }
    }
}

#[async_trait]
impl<S: Store, C: Clock> Redirector for ResolutionEngine<S, C> {
    async fn resolve(&self, code: &str, context: ClickContext) -> crate::Result<Resolution> {
        trace!(code, "resolving short code");
        let now = self.clock.now();

        let resolution = self
            .table
            .update(|table| -> crate::Result<_> {
                let Some(record) = table.get_mut(code) else {
                    return Ok(Commit::Discard(Resolution::NotFound));
                };

                if record.is_expired_at(now) {
                    return Ok(Commit::Discard(Resolution::Expired));
                }

                record.record_click(now, context);
                Ok(Commit::Save(Resolution::Valid(record.clone())))
            })
            .await?;

        match &resolution {
            Resolution::Valid(record) => {
                info!(
                    code,
                    url = %record.long_url(),
                    clicks = record.analytics().clicks(),
                    "recorded click"
                );
            }
            Resolution::NotFound => warn!(code, "short code not found"),
            Resolution::Expired => info!(code, "short code expired"),
        }

        Ok(resolution)
    }
}
