//! Database module
//!
//! Store abstraction plus the PostgreSQL and in-memory backends behind it.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::DatabaseConfig;
use crate::utils::errors::Result;

// Re-export commonly used database components
pub use connection::{connect, create_pool, health_check, run_migrations, DatabasePool};
pub use memory::MemoryStore;
pub use repositories::{
    AttendanceRepository, CollegeRepository, EventRepository, RegistrationRepository,
    ReportRepository, StudentRepository,
};
pub use service::DatabaseService;
pub use store::CampusStore;

/// Open the store selected by `config.url`
///
/// `memory://` yields a process-local [`MemoryStore`]; anything else is
/// treated as a PostgreSQL connection string.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn CampusStore>> {
    if config.is_memory() {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = connect(config).await?;
    Ok(Arc::new(DatabaseService::new(pool)))
}
