use shelftrack_core::db::open_db_in_memory;
use shelftrack_core::db::seed::{SAMPLE_AUTHORS, SAMPLE_BOOKS};
use shelftrack_core::{
    seed_sample_data, BookPatch, InventoryError, InventoryService, RecordKind, SqliteRecordStore,
    ValidationError,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> InventoryService<SqliteRecordStore<'_>> {
    InventoryService::new(SqliteRecordStore::try_new(conn).unwrap())
}

fn seeded_service(conn: &Connection) -> InventoryService<SqliteRecordStore<'_>> {
    let service = service(conn);
    assert!(seed_sample_data(&service).unwrap());
    service
}

#[test]
fn add_author_then_book_and_read_back() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .add_author(1290, "Charles Dickens", "England")
        .unwrap();
    service
        .add_book(3001, "A Tale of Two Cities", 1290, 30)
        .unwrap();

    let book = service.get_book_by_id(3001).unwrap();
    assert_eq!(book.title, "A Tale of Two Cities");
    assert_eq!(book.author_id, 1290);
    assert_eq!(book.quantity, 30);
}

#[test]
fn add_book_for_missing_author_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.add_book(9999, "Orphan Book", 4242, 5).unwrap_err();
    assert!(matches!(
        err,
        InventoryError::ForeignKeyViolation { author_id: 4242 }
    ));

    let lookup = service.get_book_by_id(9999).unwrap_err();
    assert!(matches!(
        lookup,
        InventoryError::NotFound {
            kind: RecordKind::Book,
            id: 9999
        }
    ));
}

#[test]
fn author_delete_waits_for_books_to_go() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .add_author(1290, "Charles Dickens", "England")
        .unwrap();
    service
        .add_book(3001, "A Tale of Two Cities", 1290, 30)
        .unwrap();

    let err = service.delete_author(1290).unwrap_err();
    assert!(matches!(
        err,
        InventoryError::ReferentialIntegrityViolation {
            author_id: 1290,
            book_count: 1
        }
    ));
    assert!(service.get_author_by_id(1290).is_ok());

    service.delete_book(3001).unwrap();
    service.delete_author(1290).unwrap();
    assert!(matches!(
        service.get_author_by_id(1290),
        Err(InventoryError::NotFound {
            kind: RecordKind::Author,
            ..
        })
    ));
}

#[test]
fn quantity_update_rejects_negative_and_applies_valid_value() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let err = service
        .update_book(3001, &BookPatch::quantity(-5))
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryError::InvalidInput(ValidationError::NegativeQuantity(-5))
    ));
    assert_eq!(service.get_book_by_id(3001).unwrap().quantity, 30);

    let updated = service.update_book(3001, &BookPatch::quantity(20)).unwrap();
    assert_eq!(updated.quantity, 20);
    assert_eq!(service.get_book_by_id(3001).unwrap().quantity, 20);
}

#[test]
fn title_search_is_case_insensitive() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let hits = service.search_books_by_title("lord").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "The Lord of the Rings");

    assert!(service.search_books_by_title("zzz").unwrap().is_empty());
}

#[test]
fn empty_search_matches_every_book() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let all = service.search_books_by_title("").unwrap();
    assert_eq!(all, service.list_all_books().unwrap());
}

#[test]
fn add_author_rejects_blank_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.add_author(1290, "  ", "England").unwrap_err();
    assert!(matches!(
        err,
        InventoryError::InvalidInput(ValidationError::EmptyField("author name"))
    ));
    let err = service.add_author(1290, "Charles Dickens", "").unwrap_err();
    assert!(matches!(
        err,
        InventoryError::InvalidInput(ValidationError::EmptyField("author country"))
    ));
    assert!(service.list_all_authors().unwrap().is_empty());
}

#[test]
fn add_book_validates_fields_before_checking_keys() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    // 3001 exists and 4242 does not, but the blank title is reported first.
    let err = service.add_book(3001, "", 4242, 1).unwrap_err();
    assert!(matches!(
        err,
        InventoryError::InvalidInput(ValidationError::EmptyField("book title"))
    ));
    let err = service.add_book(3001, "Copy", 4242, -1).unwrap_err();
    assert!(matches!(err, InventoryError::InvalidInput(_)));
}

#[test]
fn duplicate_ids_are_rejected_without_changes() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);
    let authors_before = service.list_all_authors().unwrap();
    let books_before = service.list_all_books().unwrap();

    let err = service.add_author(1290, "Impostor", "Nowhere").unwrap_err();
    assert!(matches!(
        err,
        InventoryError::DuplicateKey {
            kind: RecordKind::Author,
            id: 1290
        }
    ));
    let err = service.add_book(3001, "Another Title", 1290, 1).unwrap_err();
    assert!(matches!(
        err,
        InventoryError::DuplicateKey {
            kind: RecordKind::Book,
            id: 3001
        }
    ));

    assert_eq!(service.list_all_authors().unwrap(), authors_before);
    assert_eq!(service.list_all_books().unwrap(), books_before);
}

#[test]
fn update_book_reassigns_author_only_when_it_exists() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let err = service
        .update_book(3001, &BookPatch::author(4242))
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryError::ForeignKeyViolation { author_id: 4242 }
    ));
    assert_eq!(service.get_book_by_id(3001).unwrap().author_id, 1290);

    let updated = service.update_book(3001, &BookPatch::author(8937)).unwrap();
    assert_eq!(updated.author_id, 8937);
    assert_eq!(service.get_book_by_id(3001).unwrap(), updated);
}

#[test]
fn multi_field_update_is_all_or_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);
    let before = service.get_book_by_id(3002).unwrap();

    let patch = BookPatch {
        title: Some("Renamed".to_string()),
        author_id: Some(4242),
        quantity: Some(1),
    };
    assert!(service.update_book(3002, &patch).is_err());
    assert_eq!(service.get_book_by_id(3002).unwrap(), before);

    let patch = BookPatch {
        title: Some("Renamed".to_string()),
        author_id: Some(2356),
        quantity: Some(1),
    };
    let updated = service.update_book(3002, &patch).unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.author_id, 2356);
    assert_eq!(updated.quantity, 1);
}

#[test]
fn update_book_rejects_blank_title_and_missing_book() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    assert!(matches!(
        service.update_book(3001, &BookPatch::title("   ")),
        Err(InventoryError::InvalidInput(ValidationError::EmptyField(
            "book title"
        )))
    ));
    assert!(matches!(
        service.update_book(4242, &BookPatch::quantity(3)),
        Err(InventoryError::NotFound {
            kind: RecordKind::Book,
            id: 4242
        })
    ));
    assert!(matches!(
        service.update_book(4242, &BookPatch::default()),
        Err(InventoryError::NotFound { .. })
    ));
}

#[test]
fn empty_patch_returns_current_book() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let current = service.get_book_by_id(3005).unwrap();
    assert_eq!(
        service.update_book(3005, &BookPatch::default()).unwrap(),
        current
    );
}

#[test]
fn text_fields_are_trimmed_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let author = service
        .add_author(2356, "  C.S. Lewis ", "\tIreland\n")
        .unwrap();
    assert_eq!(author.name, "C.S. Lewis");
    assert_eq!(author.country, "Ireland");

    let book = service
        .add_book(3003, " The Lion, the Witch and the Wardrobe  ", 2356, 25)
        .unwrap();
    assert_eq!(book.title, "The Lion, the Witch and the Wardrobe");

    let updated = service
        .update_book(3003, &BookPatch::title("  Prince Caspian "))
        .unwrap();
    assert_eq!(updated.title, "Prince Caspian");

    let stored = service.get_book_by_id(3003).unwrap();
    assert_eq!(stored, updated);
    assert_eq!(
        service.get_author_by_id(2356).unwrap().name,
        "C.S. Lewis"
    );
}

#[test]
fn delete_missing_records_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert!(matches!(
        service.delete_book(3001),
        Err(InventoryError::NotFound {
            kind: RecordKind::Book,
            id: 3001
        })
    ));
    assert!(matches!(
        service.delete_author(1290),
        Err(InventoryError::NotFound {
            kind: RecordKind::Author,
            id: 1290
        })
    ));
}

#[test]
fn seed_inserts_sample_catalogue_once() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    assert_eq!(service.list_all_authors().unwrap().len(), SAMPLE_AUTHORS.len());
    assert_eq!(service.list_all_books().unwrap().len(), SAMPLE_BOOKS.len());
    assert!(!seed_sample_data(&service).unwrap());
    assert_eq!(service.list_all_books().unwrap().len(), SAMPLE_BOOKS.len());
}

#[test]
fn book_details_follow_store_order() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let details = service.list_book_details().unwrap();
    let ids: Vec<_> = details.iter().map(|detail| detail.book_id).collect();
    assert_eq!(ids, vec![3001, 3002, 3003, 3004, 3005]);
    assert_eq!(details[3].author_name, "J.R.R. Tolkien");
    assert_eq!(details[3].author_country, "South Africa");
}

#[test]
fn records_serialize_with_field_names() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let book = service.get_book_by_id(3004).unwrap();
    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["book_id"], 3004);
    assert_eq!(json["title"], "The Lord of the Rings");
    assert_eq!(json["author_id"], 6380);
    assert_eq!(json["quantity"], 37);
}

#[test]
fn errors_expose_stable_codes() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let codes = [
        service.add_author(1290, "x", "y").unwrap_err().code(),
        service.get_book_by_id(1).unwrap_err().code(),
        service.add_book(1, "", 1290, 0).unwrap_err().code(),
        service.add_book(1, "t", 1, 0).unwrap_err().code(),
        service.delete_author(1290).unwrap_err().code(),
    ];
    assert_eq!(
        codes,
        [
            "duplicate_key",
            "not_found",
            "invalid_input",
            "foreign_key_violation",
            "referential_integrity_violation"
        ]
    );
}
