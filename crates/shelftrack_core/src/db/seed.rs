//! Sample catalogue used to populate a fresh database.
//!
//! # Invariants
//! - Authors are inserted before the books that reference them.
//! - Seeding only runs against a store with no authors and no books.

use crate::model::author::AuthorId;
use crate::model::book::BookId;
use crate::repo::record_store::RecordStore;
use crate::service::inventory_service::{InventoryResult, InventoryService};
use log::info;

/// `(author_id, name, country)`
pub const SAMPLE_AUTHORS: &[(AuthorId, &str, &str)] = &[
    (1290, "Charles Dickens", "England"),
    (8937, "J.K. Rowling", "England"),
    (2356, "C.S. Lewis", "Ireland"),
    (6380, "J.R.R. Tolkien", "South Africa"),
    (5620, "Lewis Carroll", "England"),
];

/// `(book_id, title, author_id, quantity)`
pub const SAMPLE_BOOKS: &[(BookId, &str, AuthorId, i64)] = &[
    (3001, "A Tale of Two Cities", 1290, 30),
    (3002, "Harry Potter and the Philosopher's Stone", 8937, 40),
    (3003, "The Lion, the Witch and the Wardrobe", 2356, 25),
    (3004, "The Lord of the Rings", 6380, 37),
    (3005, "Alice's Adventures in Wonderland", 5620, 12),
];

/// Inserts the sample catalogue through the command layer.
///
/// Returns `false` without writing anything when the store already holds
/// authors or books.
pub fn seed_sample_data<S: RecordStore>(service: &InventoryService<S>) -> InventoryResult<bool> {
    if !service.list_all_authors()?.is_empty() || !service.list_all_books()?.is_empty() {
        info!("event=db_seed module=db status=skipped reason=not_empty");
        return Ok(false);
    }

    for &(author_id, name, country) in SAMPLE_AUTHORS {
        service.add_author(author_id, name, country)?;
    }
    for &(book_id, title, author_id, quantity) in SAMPLE_BOOKS {
        service.add_book(book_id, title, author_id, quantity)?;
    }

    info!(
        "event=db_seed module=db status=ok authors={} books={}",
        SAMPLE_AUTHORS.len(),
        SAMPLE_BOOKS.len()
    );
    Ok(true)
}
