//! Persistence backends for the alias table.
//!
//! [`InMemoryStore`] and [`JsonFileStore`] implement the whole-table
//! [`Store`](warren_core::Store) contract; [`Table`] wraps either one with the
//! single-writer lock every registry and resolution call goes through.

pub mod file;
pub mod memory;
pub mod table;

pub use file::{JsonFileStore, DEFAULT_NAMESPACE};
pub use memory::InMemoryStore;
pub use table::{Commit, Table};
