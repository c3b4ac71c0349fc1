//! Alias registry: creation, lookup, listing and deletion of short links.
//!
//! [`AliasRegistry`] is the write-side entry point. The [`Shortener`] trait
//! layers form-style input handling (normalization, validation order and
//! custom-token jumbling) on top of it, and [`Dashboard`] renders a sorted,
//! status-filtered view of the table.

pub mod dashboard;
pub mod error;
pub mod registry;
pub mod settings;
pub mod shortener;

pub use dashboard::{Dashboard, DashboardRow, StatusFilter};
pub use error::RegistryError;
pub use registry::AliasRegistry;
pub use settings::RegistrySettings;
pub use shortener::{ShortenParams, Shortener};
