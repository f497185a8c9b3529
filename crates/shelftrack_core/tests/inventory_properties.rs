//! Property tests for the integrity rules of the inventory commands.

use proptest::prelude::*;
use shelftrack_core::db::open_db_in_memory;
use shelftrack_core::db::seed::{SAMPLE_AUTHORS, SAMPLE_BOOKS};
use shelftrack_core::{
    seed_sample_data, BookPatch, InventoryError, InventoryService, SqliteRecordStore,
};

/// Author ids that are not part of the sample catalogue.
fn missing_author_id() -> impl Strategy<Value = i64> {
    (1i64..10_000).prop_filter("must not be a sample author", |id| {
        SAMPLE_AUTHORS.iter().all(|(author_id, _, _)| author_id != id)
    })
}

fn sample_book_id() -> impl Strategy<Value = i64> {
    prop::sample::select(SAMPLE_BOOKS.iter().map(|(id, ..)| *id).collect::<Vec<_>>())
}

fn sample_author_id() -> impl Strategy<Value = i64> {
    prop::sample::select(SAMPLE_AUTHORS.iter().map(|(id, ..)| *id).collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Books never reference absent authors, on add or on update.
    #[test]
    fn missing_author_is_always_a_foreign_key_violation(
        author_id in missing_author_id(),
        book_id in 4000i64..5000,
        existing in sample_book_id(),
    ) {
        let conn = open_db_in_memory().unwrap();
        let service = InventoryService::new(SqliteRecordStore::try_new(&conn).unwrap());
        seed_sample_data(&service).unwrap();
        let before = service.list_all_books().unwrap();

        let add = service.add_book(book_id, "Orphan Book", author_id, 1);
        let is_fk_violation = matches!(add, Err(InventoryError::ForeignKeyViolation { .. }));
        prop_assert!(is_fk_violation);
        let update = service.update_book(existing, &BookPatch::author(author_id));
        let is_fk_violation = matches!(update, Err(InventoryError::ForeignKeyViolation { .. }));
        prop_assert!(is_fk_violation);

        prop_assert_eq!(service.list_all_books().unwrap(), before);
    }

    /// Reusing any taken id fails and leaves both tables untouched.
    #[test]
    fn taken_ids_are_always_duplicate_keys(
        author_id in sample_author_id(),
        book_id in sample_book_id(),
        quantity in 0i64..1000,
    ) {
        let conn = open_db_in_memory().unwrap();
        let service = InventoryService::new(SqliteRecordStore::try_new(&conn).unwrap());
        seed_sample_data(&service).unwrap();
        let authors = service.list_all_authors().unwrap();
        let books = service.list_all_books().unwrap();

        let add_author = service.add_author(author_id, "Someone", "Somewhere");
        let is_duplicate = matches!(add_author, Err(InventoryError::DuplicateKey { .. }));
        prop_assert!(is_duplicate);
        let add_book = service.add_book(book_id, "Some Title", author_id, quantity);
        let is_duplicate = matches!(add_book, Err(InventoryError::DuplicateKey { .. }));
        prop_assert!(is_duplicate);

        prop_assert_eq!(service.list_all_authors().unwrap(), authors);
        prop_assert_eq!(service.list_all_books().unwrap(), books);
    }

    /// Negative quantities never reach storage.
    #[test]
    fn negative_quantity_is_always_invalid_input(
        quantity in i64::MIN..0,
        existing in sample_book_id(),
    ) {
        let conn = open_db_in_memory().unwrap();
        let service = InventoryService::new(SqliteRecordStore::try_new(&conn).unwrap());
        seed_sample_data(&service).unwrap();
        let before = service.list_all_books().unwrap();

        let add = service.add_book(4999, "Negative Stock", 1290, quantity);
        let is_invalid = matches!(add, Err(InventoryError::InvalidInput(_)));
        prop_assert!(is_invalid);
        let update = service.update_book(existing, &BookPatch::quantity(quantity));
        let is_invalid = matches!(update, Err(InventoryError::InvalidInput(_)));
        prop_assert!(is_invalid);

        prop_assert_eq!(service.list_all_books().unwrap(), before);
    }

    /// Listing is a pure read: repeated calls agree after any successful add.
    #[test]
    fn listing_twice_returns_identical_sequences(
        new_ids in prop::collection::btree_set(4000i64..5000, 0..8),
    ) {
        let conn = open_db_in_memory().unwrap();
        let service = InventoryService::new(SqliteRecordStore::try_new(&conn).unwrap());
        seed_sample_data(&service).unwrap();
        for book_id in &new_ids {
            service.add_book(*book_id, "Extra Copy", 5620, 1).unwrap();
        }

        let first = service.list_all_books().unwrap();
        let second = service.list_all_books().unwrap();
        prop_assert_eq!(first.len(), SAMPLE_BOOKS.len() + new_ids.len());
        prop_assert_eq!(first, second);
    }
}
