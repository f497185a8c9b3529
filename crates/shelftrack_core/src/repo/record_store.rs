//! Record store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide primary-key CRUD over the `authors` and `books` tables.
//! - Provide title scans and per-author counts for the service layer.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Only per-table primary-key uniqueness and row existence are enforced
//!   here; cross-table rules belong to `InventoryService`.
//! - Every mutation runs as one autocommit statement.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Sequences are returned in store order (ascending primary key).

use crate::db::schema::{stamped_version, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookDetail, BookId, BookPatch};
use crate::model::RecordKind;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const AUTHOR_SELECT_SQL: &str = "SELECT author_id, name, country FROM authors";
const BOOK_SELECT_SQL: &str = "SELECT book_id, title, author_id, quantity FROM books";

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("authors", &["author_id", "name", "country"]),
    ("books", &["book_id", "title", "author_id", "quantity"]),
];

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store error for persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Insert used a primary key that is already taken.
    DuplicateKey { kind: RecordKind, id: i64 },
    /// Update/delete target does not exist.
    NotFound { kind: RecordKind, id: i64 },
    /// Connection schema version does not match this binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateKey { kind, id } => write!(f, "{kind} id {id} already exists"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "record store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "record store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "record store requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage interface for author and book rows.
pub trait RecordStore {
    fn get_author(&self, id: AuthorId) -> StoreResult<Option<Author>>;
    fn get_book(&self, id: BookId) -> StoreResult<Option<Book>>;
    fn insert_author(&self, author: &Author) -> StoreResult<()>;
    fn insert_book(&self, book: &Book) -> StoreResult<()>;
    /// Applies the supplied fields of `patch`; absent fields keep their value.
    fn update_book(&self, id: BookId, patch: &BookPatch) -> StoreResult<()>;
    fn delete_author(&self, id: AuthorId) -> StoreResult<()>;
    fn delete_book(&self, id: BookId) -> StoreResult<()>;
    /// Case-insensitive substring scan over book titles.
    fn find_books_by_title(&self, needle: &str) -> StoreResult<Vec<Book>>;
    fn list_books(&self) -> StoreResult<Vec<Book>>;
    fn count_books_for_author(&self, id: AuthorId) -> StoreResult<u64>;
    fn list_authors(&self) -> StoreResult<Vec<Author>>;
    /// Books joined with their authors. Books without an author row are skipped.
    fn list_book_details(&self) -> StoreResult<Vec<BookDetail>>;
}

/// SQLite-backed record store.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    /// Constructs a store from a connection returned by `open_db*`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn get_author(&self, id: AuthorId) -> StoreResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE author_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn get_book(&self, id: BookId) -> StoreResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE book_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn insert_author(&self, author: &Author) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO authors (author_id, name, country) VALUES (?1, ?2, ?3);",
                params![author.author_id, author.name, author.country],
            )
            .map_err(|err| map_insert_error(err, RecordKind::Author, author.author_id))?;
        Ok(())
    }

    fn insert_book(&self, book: &Book) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO books (book_id, title, author_id, quantity)
                 VALUES (?1, ?2, ?3, ?4);",
                params![book.book_id, book.title, book.author_id, book.quantity],
            )
            .map_err(|err| map_insert_error(err, RecordKind::Book, book.book_id))?;
        Ok(())
    }

    fn update_book(&self, id: BookId, patch: &BookPatch) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = COALESCE(?2, title),
                author_id = COALESCE(?3, author_id),
                quantity = COALESCE(?4, quantity)
             WHERE book_id = ?1;",
            params![id, patch.title, patch.author_id, patch.quantity],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: RecordKind::Book,
                id,
            });
        }

        Ok(())
    }

    fn delete_author(&self, id: AuthorId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE author_id = ?1;", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: RecordKind::Author,
                id,
            });
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE book_id = ?1;", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: RecordKind::Book,
                id,
            });
        }

        Ok(())
    }

    fn find_books_by_title(&self, needle: &str) -> StoreResult<Vec<Book>> {
        // SQLite's LIKE/lower() fold ASCII only, so the predicate runs here.
        let needle = needle.to_lowercase();
        let books = self
            .list_books()?
            .into_iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .collect();
        Ok(books)
    }

    fn list_books(&self) -> StoreResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY book_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn count_books_for_author(&self, id: AuthorId) -> StoreResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM books WHERE author_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("negative book count `{count}`")))
    }

    fn list_authors(&self) -> StoreResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY author_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    // Both halves of the joined row go through the same checks as the
    // single-table reads.
    fn list_book_details(&self) -> StoreResult<Vec<BookDetail>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                b.book_id,
                b.title,
                b.author_id,
                b.quantity,
                a.name,
                a.country
             FROM books b
             INNER JOIN authors a ON a.author_id = b.author_id
             ORDER BY b.book_id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut details = Vec::new();
        while let Some(row) = rows.next()? {
            let book = parse_book_row(row)?;
            let author = parse_author_row(row)?;
            details.push(BookDetail {
                book_id: book.book_id,
                title: book.title,
                author_name: author.name,
                author_country: author.country,
                quantity: book.quantity,
            });
        }

        Ok(details)
    }
}

fn parse_author_row(row: &Row<'_>) -> StoreResult<Author> {
    let author = Author {
        author_id: row.get("author_id")?,
        name: row.get("name")?,
        country: row.get("country")?,
    };
    author.validate().map_err(|err| {
        StoreError::InvalidData(format!("authors row {}: {err}", author.author_id))
    })?;
    Ok(author)
}

fn parse_book_row(row: &Row<'_>) -> StoreResult<Book> {
    let book = Book {
        book_id: row.get("book_id")?,
        title: row.get("title")?,
        author_id: row.get("author_id")?,
        quantity: row.get("quantity")?,
    };
    book.validate()
        .map_err(|err| StoreError::InvalidData(format!("books row {}: {err}", book.book_id)))?;
    Ok(book)
}

fn map_insert_error(err: rusqlite::Error, kind: RecordKind, id: i64) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StoreError::DuplicateKey { kind, id }
        }
        _ => err.into(),
    }
}

fn ensure_store_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = SCHEMA_VERSION;
    let actual_version = stamped_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(StoreError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
