//! Author domain model.
//!
//! # Invariants
//! - `author_id` is the primary key and never changes after insert.
//! - `name` and `country` are non-blank.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Primary key of the `authors` table.
pub type AuthorId = i64;

/// Persisted author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub author_id: AuthorId,
    pub name: String,
    pub country: String,
}

impl Author {
    /// Builds a validated author record.
    pub fn new(
        author_id: AuthorId,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let author = Self {
            author_id,
            name: name.into(),
            country: country.into(),
        };
        author.validate()?;
        Ok(author)
    }

    /// Checks field-level constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("author name", &self.name)?;
        require_text("author country", &self.country)
    }
}
