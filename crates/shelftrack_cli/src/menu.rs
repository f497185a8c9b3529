//! Interactive main menu.
//!
//! Each entry gathers input, calls exactly one inventory command and prints
//! the outcome. Business rules live in `InventoryService`; this module only
//! parses text and formats records.

use crate::input::{parse_quantity, parse_record_id, parse_required_text, Console, Reply};
use shelftrack_core::{Author, Book, BookPatch, InventoryService, RecordStore};
use std::io::{BufRead, Write};

const MENU: &str = "Select one of the following options:
    1 - add book/author
    2 - update book
    3 - delete book/author
    4 - search books
    5 - view details of all books
    0 - exit
: ";

const RULE_WIDTH: usize = 55;

pub struct Menu<S: RecordStore, R, W> {
    service: InventoryService<S>,
    console: Console<R, W>,
}

impl<S: RecordStore, R: BufRead, W: Write> Menu<S, R, W> {
    pub fn new(service: InventoryService<S>, console: Console<R, W>) -> Self {
        Self { service, console }
    }

    /// Runs until the user picks `0` or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let choice = match self.console.ask(MENU)? {
                Reply::Text(text) => text,
                Reply::Cancel => continue,
                Reply::Closed => break,
            };

            match choice.as_str() {
                "1" => self.add_book_or_author()?,
                "2" => self.update_book()?,
                "3" => self.delete_book_or_author()?,
                "4" => self.search_books()?,
                "5" => self.view_all_books()?,
                "0" => break,
                _ => self.console.say("Invalid option.")?,
            }
        }

        self.console.say("Goodbye!!!")
    }

    fn add_book_or_author(&mut self) -> anyhow::Result<()> {
        match self.ask_kind("What would you like to add? ('Book' or 'Author', or 'x' to cancel): ")? {
            Some(Kind::Book) => self.add_book(),
            Some(Kind::Author) => self.add_author(),
            None => Ok(()),
        }
    }

    fn add_author(&mut self) -> anyhow::Result<()> {
        let Some(author_id) = self.ask_id("Author", "Enter new 4-digit author ID or 'x' to cancel: ")? else {
            return Ok(());
        };
        let Some(name) = self.ask_text("Author name", "Enter author name: ")? else {
            return Ok(());
        };
        let Some(country) = self.ask_text("Author country", "Enter author's country: ")? else {
            return Ok(());
        };

        match self.service.add_author(author_id, name, country) {
            Ok(_) => self.console.say("Author added successfully.\n"),
            Err(err) => self.report(&err),
        }
    }

    fn add_book(&mut self) -> anyhow::Result<()> {
        let Some(book_id) = self.ask_id("Book", "Enter 4-digit book ID or 'x' to cancel: ")? else {
            return Ok(());
        };
        let Some(title) = self.ask_text("Book title", "Enter book title or 'x' to cancel: ")? else {
            return Ok(());
        };
        let Some(author_id) = self.ask_id("Author", "Enter 4-digit author ID or 'x' to cancel: ")? else {
            return Ok(());
        };
        let Some(quantity) = self
            .console
            .ask_parsed("Enter quantity or 'x' to cancel: ", parse_quantity)?
        else {
            return Ok(());
        };

        match self.service.add_book(book_id, title, author_id, quantity) {
            Ok(_) => self.console.say("Book added successfully.\n"),
            Err(err) => self.report(&err),
        }
    }

    fn update_book(&mut self) -> anyhow::Result<()> {
        let Some(book) = self.ask_existing_book("Enter the ID of the book to update (or 'x' to cancel): ")? else {
            return Ok(());
        };
        self.console
            .say(&format!("\nCurrent book details:\n{}", format_book(&book)))?;

        loop {
            let Some(field) = self
                .console
                .ask("What would you like to update? (qty/title/authorID) [default is qty, 'x' to cancel]: ")?
                .into_text()
            else {
                return Ok(());
            };

            let patch = match field.to_ascii_lowercase().as_str() {
                "" | "qty" => self
                    .console
                    .ask_parsed("Enter new quantity (or 'x' to cancel): ", parse_quantity)?
                    .map(BookPatch::quantity),
                "title" => self
                    .ask_text("Title", "Enter new title (or 'x' to cancel): ")?
                    .map(BookPatch::title),
                "authorid" => self
                    .ask_id("Author", "Enter new author ID (must already exist, or 'x' to cancel): ")?
                    .map(BookPatch::author),
                _ => {
                    self.console
                        .say("Invalid field. Please choose from: qty, title, authorID.\n")?;
                    continue;
                }
            };
            let Some(patch) = patch else {
                return Ok(());
            };

            return match self.service.update_book(book.book_id, &patch) {
                Ok(updated) => self
                    .console
                    .say(&format!("Book updated successfully.\n{}", format_book(&updated))),
                Err(err) => self.report(&err),
            };
        }
    }

    fn delete_book_or_author(&mut self) -> anyhow::Result<()> {
        match self.ask_kind("What would you like to delete? ('Book' or 'Author' or 'x' to cancel): ")? {
            Some(Kind::Book) => self.delete_book(),
            Some(Kind::Author) => self.delete_author(),
            None => Ok(()),
        }
    }

    fn delete_book(&mut self) -> anyhow::Result<()> {
        let Some(book) = self.ask_existing_book("Enter the 4-digit ID of the book to delete (or 'x' to cancel): ")? else {
            return Ok(());
        };
        self.console
            .say(&format!("\nBook selected:\n{}", format_book(&book)))?;

        match self.console.confirm("Delete this book? (yes/no): ")? {
            Some(true) => match self.service.delete_book(book.book_id) {
                Ok(()) => self.console.say("Book deleted successfully.\n"),
                Err(err) => self.report(&err),
            },
            Some(false) => self.console.say("Deletion cancelled.\n"),
            None => Ok(()),
        }
    }

    fn delete_author(&mut self) -> anyhow::Result<()> {
        let author = loop {
            let Some(author_id) = self.ask_id("Author", "Enter the 4-digit ID of the author to delete (or 'x' to cancel): ")? else {
                return Ok(());
            };
            match self.service.get_author_by_id(author_id) {
                Ok(author) => break author,
                Err(err) => self.report(&err)?,
            }
        };
        self.console
            .say(&format!("\nAuthor selected:\n{}", format_author(&author)))?;

        match self.console.confirm("Delete this author? (yes/no): ")? {
            Some(true) => match self.service.delete_author(author.author_id) {
                Ok(()) => self.console.say("Author deleted successfully.\n"),
                Err(err) => self.report(&err),
            },
            Some(false) => self.console.say("Deletion cancelled.\n"),
            None => Ok(()),
        }
    }

    fn search_books(&mut self) -> anyhow::Result<()> {
        loop {
            let Some(mode) = self
                .console
                .ask("Search by ID or title? (type 'id' or 'title', or 'x' to cancel): ")?
                .into_text()
            else {
                return Ok(());
            };

            match mode.to_ascii_lowercase().as_str() {
                "id" => {
                    let Some(book_id) = self.ask_id("Book", "Enter the 4-digit book ID (or 'x' to cancel): ")? else {
                        return Ok(());
                    };
                    return match self.service.get_book_by_id(book_id) {
                        Ok(book) => self
                            .console
                            .say(&format!("\nBook found:\n{}", format_book(&book))),
                        Err(err) => self.report(&err),
                    };
                }
                "title" => {
                    let Some(needle) = self.ask_text(
                        "Book title",
                        "Enter the book title (or part of it, or 'x' to cancel): ",
                    )?
                    else {
                        return Ok(());
                    };
                    return match self.service.search_books_by_title(&needle) {
                        Ok(books) if books.is_empty() => self
                            .console
                            .say("No books found matching that title.\n"),
                        Ok(books) => {
                            self.console.say("\nBooks found:")?;
                            for book in &books {
                                self.console.say(&format!(
                                    "ID: {} | Title: {} | AuthorID: {} | Quantity: {}",
                                    book.book_id, book.title, book.author_id, book.quantity
                                ))?;
                            }
                            self.console.say("")
                        }
                        Err(err) => self.report(&err),
                    };
                }
                "" => self.console.say("Input cannot be blank.\n")?,
                _ => self
                    .console
                    .say("Invalid option. Please type 'id', 'title', or 'x'.\n")?,
            }
        }
    }

    fn view_all_books(&mut self) -> anyhow::Result<()> {
        let details = match self.service.list_book_details() {
            Ok(details) => details,
            Err(err) => return self.report(&err),
        };

        let rule = "-".repeat(RULE_WIDTH);
        self.console.say(&format!("\nDetails\n{rule}"))?;
        for detail in &details {
            self.console.say(&format!(
                "Title: {}\nAuthor's Name: {}\nAuthor's Country: {}\n{rule}",
                detail.title, detail.author_name, detail.author_country
            ))?;
        }
        Ok(())
    }

    fn ask_kind(&mut self, message: &str) -> anyhow::Result<Option<Kind>> {
        self.console
            .ask_parsed(message, |text| match text.to_ascii_lowercase().as_str() {
                "book" => Ok(Kind::Book),
                "author" => Ok(Kind::Author),
                "" => Err("Input cannot be blank.".to_string()),
                _ => Err("Invalid option. Choose 'Book' or 'Author'.".to_string()),
            })
    }

    fn ask_id(&mut self, label: &str, message: &str) -> anyhow::Result<Option<i64>> {
        self.console
            .ask_parsed(message, |text| parse_record_id(label, text))
    }

    fn ask_text(&mut self, label: &str, message: &str) -> anyhow::Result<Option<String>> {
        self.console
            .ask_parsed(message, |text| parse_required_text(label, text))
    }

    fn ask_existing_book(&mut self, message: &str) -> anyhow::Result<Option<Book>> {
        loop {
            let Some(book_id) = self.ask_id("Book", message)? else {
                return Ok(None);
            };
            match self.service.get_book_by_id(book_id) {
                Ok(book) => return Ok(Some(book)),
                Err(err) => self.report(&err)?,
            }
        }
    }

    fn report(&mut self, err: &shelftrack_core::InventoryError) -> anyhow::Result<()> {
        self.console.say(&format!("Error: {err}.\n"))
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Book,
    Author,
}

fn format_book(book: &Book) -> String {
    format!(
        "ID: {}\nTitle: {}\nAuthorID: {}\nQuantity: {}\n",
        book.book_id, book.title, book.author_id, book.quantity
    )
}

fn format_author(author: &Author) -> String {
    format!(
        "ID: {}\nName: {}\nCountry: {}\n",
        author.author_id, author.name, author.country
    )
}
