//! Resolution engine for the Warren URL shortener.
//!
//! [`ResolutionEngine`] turns a short code into its destination, checking
//! expiry against an injected clock and recording one click per successful
//! resolution.
//!
//! # Example
//!
//! ```rust
//! use warren_core::{AliasRecord, AliasTable, ClickContext, ShortCode, SystemClock};
//! use warren_redirector::{Redirector, ResolutionEngine};
//! use warren_storage::{InMemoryStore, Table};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut aliases = AliasTable::new();
//! let record = AliasRecord::new(
//!     ShortCode::new("abc123")?,
//!     "https://example.com",
//!     jiff::Timestamp::now(),
//!     30,
//! )?;
//! let _ = aliases.insert_new(record);
//!
//! let engine = ResolutionEngine::new(
//!     Table::new(InMemoryStore::with_table(aliases)),
//!     SystemClock,
//! );
//!
//! if let Some(url) = engine.resolve("abc123", ClickContext::direct()).await?.destination() {
//!     println!("Redirect to: {url}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod redirector;
pub mod service;

pub use error::{RedirectorError, Result};
pub use redirector::{Redirector, Resolution};
pub use service::ResolutionEngine;
