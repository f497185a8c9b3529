//! Inventory domain model.
//!
//! # Responsibility
//! - Define the author and book records shared by store and service layers.
//! - Provide field-level validation that runs before any storage access.
//!
//! # Invariants
//! - `Author` and `Book` values built through `new` have passed `validate()`.
//! - Cross-record rules (foreign keys, delete guards) live in the service
//!   layer, not here.

pub mod author;
pub mod book;
pub mod validation;

use std::fmt::{Display, Formatter};

/// Table a primary key belongs to, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Author,
    Book,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Author => f.write_str("author"),
            Self::Book => f.write_str("book"),
        }
    }
}
