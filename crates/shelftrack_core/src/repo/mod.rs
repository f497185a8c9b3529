//! Persistence layer for the inventory tables.
//!
//! # Responsibility
//! - Define the storage contract the command layer depends on.
//! - Isolate SQLite query details from business rules.
//!
//! # Invariants
//! - Store APIs return semantic errors (`DuplicateKey`, `NotFound`) in
//!   addition to DB transport errors.

pub mod record_store;
