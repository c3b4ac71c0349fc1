//! Core types and traits for the Warren URL shortener.
//!
//! This crate provides the alias record model, the storage contract, the
//! validation layer and the clock abstraction shared by the registry and
//! the resolution engine.

pub mod clock;
pub mod error;
pub mod record;
pub mod retry;
pub mod shortcode;
pub mod store;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Exhausted, StorageError, ValidationError};
pub use record::{AliasRecord, Analytics, ClickContext, ClickEvent, Location, RecordStatus};
pub use retry::try_n_times;
pub use shortcode::ShortCode;
pub use store::{AliasTable, Store};
