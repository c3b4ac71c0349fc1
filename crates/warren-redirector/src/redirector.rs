use crate::Result;
use async_trait::async_trait;
use warren_core::{AliasRecord, ClickContext};

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The code is live; the caller should navigate to `record.long_url()`.
    /// The record already includes the click just recorded.
    Valid(AliasRecord),
    NotFound,
    Expired,
}

impl Resolution {
    /// The destination to navigate to, if any.
    pub fn destination(&self) -> Option<&str> {
        match self {
            Resolution::Valid(record) => Some(record.long_url()),
            Resolution::NotFound | Resolution::Expired => None,
        }
    }
}

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code and, when it is live, records one click with
    /// the caller-supplied `context`.
    async fn resolve(&self, code: &str, context: ClickContext) -> Result<Resolution>;
}
