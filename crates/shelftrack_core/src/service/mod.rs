//! Core use-case services.
//!
//! # Responsibility
//! - Apply business rules before delegating to the record store.
//! - Keep the CLI decoupled from storage details.

pub mod inventory_service;
