//! Campus Events backend
//!
//! Colleges publish events, students register, attendance and feedback are
//! recorded per registration, and reports aggregate all of it. This library
//! provides the entity store (PostgreSQL or in-memory), the aggregation
//! engine and the JSON HTTP surface.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod reports;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CampusError, Result};

// Re-export main components for easy access
pub use database::{open_store, CampusStore, DatabaseService, MemoryStore};
pub use handlers::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
