//! Core domain logic for ShelfTrack.
//! This crate is the single source of truth for inventory invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::seed::seed_sample_data;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookDetail, BookId, BookPatch};
pub use model::validation::ValidationError;
pub use model::RecordKind;
pub use repo::record_store::{RecordStore, SqliteRecordStore, StoreError, StoreResult};
pub use service::inventory_service::{InventoryError, InventoryResult, InventoryService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
