//! Book domain model.
//!
//! # Responsibility
//! - Define the persisted book row and its partial-update request.
//! - Provide the joined read model used by the catalogue listing.
//!
//! # Invariants
//! - `title` is non-blank and `quantity >= 0` for every stored book.
//! - `author_id` must reference an existing author; that rule is enforced by
//!   `InventoryService`, not by this type.

use crate::model::author::AuthorId;
use crate::model::validation::{require_quantity, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Primary key of the `books` table.
pub type BookId = i64;

/// Persisted book row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: BookId,
    pub title: String,
    pub author_id: AuthorId,
    /// Copies in stock. Signed so that caller input can be range-checked.
    pub quantity: i64,
}

impl Book {
    /// Builds a validated book record.
    pub fn new(
        book_id: BookId,
        title: impl Into<String>,
        author_id: AuthorId,
        quantity: i64,
    ) -> Result<Self, ValidationError> {
        let book = Self {
            book_id,
            title: title.into(),
            author_id,
            quantity,
        };
        book.validate()?;
        Ok(book)
    }

    /// Checks field-level constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("book title", &self.title)?;
        require_quantity(self.quantity)
    }
}

/// Partial update for one book. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author_id: Option<AuthorId>,
    pub quantity: Option<i64>,
}

impl BookPatch {
    /// Patch that only replaces the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Patch that only reassigns the author.
    pub fn author(author_id: AuthorId) -> Self {
        Self {
            author_id: Some(author_id),
            ..Self::default()
        }
    }

    /// Patch that only replaces the stock quantity.
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    /// Returns whether no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author_id.is_none() && self.quantity.is_none()
    }

    /// Checks every supplied field independently.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = self.title.as_deref() {
            require_text("book title", title)?;
        }
        if let Some(quantity) = self.quantity {
            require_quantity(quantity)?;
        }
        Ok(())
    }
}

/// Book joined with its author for catalogue display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetail {
    pub book_id: BookId,
    pub title: String,
    pub author_name: String,
    pub author_country: String,
    pub quantity: i64,
}
