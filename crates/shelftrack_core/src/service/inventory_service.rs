//! Inventory command layer.
//!
//! # Responsibility
//! - Provide one entry point per user-facing inventory action.
//! - Enforce cross-record rules above the record store.
//!
//! # Invariants
//! - Field validation runs before any store access.
//! - Every book references an existing author after each call.
//! - An author is never removed while books still reference it.
//! - The service keeps no state between calls besides its store.

use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookDetail, BookId, BookPatch};
use crate::model::validation::ValidationError;
use crate::model::RecordKind;
use crate::repo::record_store::{RecordStore, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors returned by inventory commands.
#[derive(Debug)]
pub enum InventoryError {
    /// A field failed a basic constraint; nothing was read or written.
    InvalidInput(ValidationError),
    /// Insert used an id that is already present.
    DuplicateKey { kind: RecordKind, id: i64 },
    /// Lookup, update or delete target does not exist.
    NotFound { kind: RecordKind, id: i64 },
    /// Book references an author id with no author row.
    ForeignKeyViolation { author_id: AuthorId },
    /// Author deletion blocked by books that still reference it.
    ReferentialIntegrityViolation {
        author_id: AuthorId,
        book_count: u64,
    },
    /// Storage-level failure.
    Store(StoreError),
}

impl InventoryError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::DuplicateKey { .. } => "duplicate_key",
            Self::NotFound { .. } => "not_found",
            Self::ForeignKeyViolation { .. } => "foreign_key_violation",
            Self::ReferentialIntegrityViolation { .. } => "referential_integrity_violation",
            Self::Store(_) => "store_error",
        }
    }
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::DuplicateKey { kind, id } => write!(f, "{kind} id {id} already exists"),
            Self::NotFound { kind, id } => write!(f, "no {kind} found with id {id}"),
            Self::ForeignKeyViolation { author_id } => {
                write!(f, "no author found with id {author_id}")
            }
            Self::ReferentialIntegrityViolation {
                author_id,
                book_count,
            } => write!(
                f,
                "author {author_id} still has {book_count} book(s); delete those books first"
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for InventoryError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<StoreError> for InventoryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateKey { kind, id } => Self::DuplicateKey { kind, id },
            StoreError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Store(other),
        }
    }
}

/// Command facade over a record store.
pub struct InventoryService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> InventoryService<S> {
    /// Creates a service that owns the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds one author. `name` and `country` are trimmed before storage.
    ///
    /// # Errors
    /// - `InvalidInput` when `name` or `country` is blank.
    /// - `DuplicateKey` when `author_id` is taken.
    pub fn add_author(
        &self,
        author_id: AuthorId,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> InventoryResult<Author> {
        let result = self.try_add_author(author_id, normalize_text(name), normalize_text(country));
        log_outcome("author_add", "author_id", author_id, &result);
        result
    }

    /// Adds one book for an existing author. `title` is trimmed before storage.
    ///
    /// # Errors
    /// - `InvalidInput` when `title` is blank or `quantity < 0`.
    /// - `DuplicateKey` when `book_id` is taken.
    /// - `ForeignKeyViolation` when `author_id` has no author row.
    pub fn add_book(
        &self,
        book_id: BookId,
        title: impl Into<String>,
        author_id: AuthorId,
        quantity: i64,
    ) -> InventoryResult<Book> {
        let result = self.try_add_book(book_id, normalize_text(title), author_id, quantity);
        log_outcome("book_add", "book_id", book_id, &result);
        result
    }

    /// Applies a partial update to one book and returns the stored result.
    ///
    /// Every supplied field is validated before anything is written; an
    /// empty patch returns the current book unchanged.
    ///
    /// # Errors
    /// - `InvalidInput` for a blank title or negative quantity.
    /// - `NotFound` when the book does not exist.
    /// - `ForeignKeyViolation` when a supplied `author_id` has no author row.
    pub fn update_book(&self, book_id: BookId, patch: &BookPatch) -> InventoryResult<Book> {
        let mut patch = patch.clone();
        patch.title = patch.title.map(normalize_text);
        let result = self.try_update_book(book_id, &patch);
        log_outcome("book_update", "book_id", book_id, &result);
        result
    }

    /// Deletes one book. Books have no dependents.
    pub fn delete_book(&self, book_id: BookId) -> InventoryResult<()> {
        let result: InventoryResult<()> = self.store.delete_book(book_id).map_err(Into::into);
        log_outcome("book_delete", "book_id", book_id, &result);
        result
    }

    /// Deletes one author that no book references.
    ///
    /// # Errors
    /// - `NotFound` when the author does not exist.
    /// - `ReferentialIntegrityViolation` when books still reference it.
    pub fn delete_author(&self, author_id: AuthorId) -> InventoryResult<()> {
        let result = self.try_delete_author(author_id);
        log_outcome("author_delete", "author_id", author_id, &result);
        result
    }

    /// Returns books whose title contains `needle`, ignoring case.
    pub fn search_books_by_title(&self, needle: &str) -> InventoryResult<Vec<Book>> {
        self.store.find_books_by_title(needle).map_err(Into::into)
    }

    pub fn get_book_by_id(&self, book_id: BookId) -> InventoryResult<Book> {
        self.store
            .get_book(book_id)?
            .ok_or(InventoryError::NotFound {
                kind: RecordKind::Book,
                id: book_id,
            })
    }

    pub fn get_author_by_id(&self, author_id: AuthorId) -> InventoryResult<Author> {
        self.store
            .get_author(author_id)?
            .ok_or(InventoryError::NotFound {
                kind: RecordKind::Author,
                id: author_id,
            })
    }

    /// Lists every book in store order.
    pub fn list_all_books(&self) -> InventoryResult<Vec<Book>> {
        self.store.list_books().map_err(Into::into)
    }

    /// Lists every author in store order.
    pub fn list_all_authors(&self) -> InventoryResult<Vec<Author>> {
        self.store.list_authors().map_err(Into::into)
    }

    /// Lists books with their author's name and country.
    pub fn list_book_details(&self) -> InventoryResult<Vec<BookDetail>> {
        self.store.list_book_details().map_err(Into::into)
    }

    fn try_add_author(
        &self,
        author_id: AuthorId,
        name: String,
        country: String,
    ) -> InventoryResult<Author> {
        let author = Author::new(author_id, name, country)?;
        if self.store.get_author(author_id)?.is_some() {
            return Err(InventoryError::DuplicateKey {
                kind: RecordKind::Author,
                id: author_id,
            });
        }
        self.store.insert_author(&author)?;
        Ok(author)
    }

    fn try_add_book(
        &self,
        book_id: BookId,
        title: String,
        author_id: AuthorId,
        quantity: i64,
    ) -> InventoryResult<Book> {
        let book = Book::new(book_id, title, author_id, quantity)?;
        if self.store.get_book(book_id)?.is_some() {
            return Err(InventoryError::DuplicateKey {
                kind: RecordKind::Book,
                id: book_id,
            });
        }
        self.ensure_author_exists(author_id)?;
        self.store.insert_book(&book)?;
        Ok(book)
    }

    fn try_update_book(&self, book_id: BookId, patch: &BookPatch) -> InventoryResult<Book> {
        patch.validate()?;
        let mut book = self.get_book_by_id(book_id)?;
        if patch.is_empty() {
            return Ok(book);
        }
        if let Some(author_id) = patch.author_id {
            self.ensure_author_exists(author_id)?;
        }
        self.store.update_book(book_id, patch)?;

        if let Some(title) = patch.title.as_ref() {
            book.title = title.clone();
        }
        if let Some(author_id) = patch.author_id {
            book.author_id = author_id;
        }
        if let Some(quantity) = patch.quantity {
            book.quantity = quantity;
        }
        Ok(book)
    }

    fn try_delete_author(&self, author_id: AuthorId) -> InventoryResult<()> {
        self.get_author_by_id(author_id)?;
        let book_count = self.store.count_books_for_author(author_id)?;
        if book_count > 0 {
            return Err(InventoryError::ReferentialIntegrityViolation {
                author_id,
                book_count,
            });
        }
        self.store.delete_author(author_id)?;
        Ok(())
    }

    fn ensure_author_exists(&self, author_id: AuthorId) -> InventoryResult<()> {
        match self.store.get_author(author_id)? {
            Some(_) => Ok(()),
            None => Err(InventoryError::ForeignKeyViolation { author_id }),
        }
    }
}

/// Strips surrounding whitespace from user-entered text.
fn normalize_text(value: impl Into<String>) -> String {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        return value;
    }
    trimmed.to_string()
}

fn log_outcome<T>(event: &str, id_key: &str, id: i64, result: &InventoryResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=service status=ok {id_key}={id}"),
        Err(err @ InventoryError::Store(_)) => error!(
            "event={event} module=service status=error {id_key}={id} error_code={} error={err}",
            err.code()
        ),
        Err(err) => warn!(
            "event={event} module=service status=rejected {id_key}={id} error_code={}",
            err.code()
        ),
    }
}
