use serde::{Deserialize, Serialize};

pub const BOOKS_TABLE: &str = "books";

/// Column order used by every `SELECT`/`RETURNING` in the repository.
/// `Book::from_row` reads by these positions.
pub const BOOK_COLUMNS: &str = "id, title, author, published_year, summary";

pub const MIN_PUBLISHED_YEAR: i64 = 0;
pub const MAX_PUBLISHED_YEAR: i64 = 2100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub summary: Option<String>,
}

/// The full, already validated field set accepted by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub summary: Option<String>,
}

impl Book {
    pub fn from_row(row: &libsql::Row) -> anyhow::Result<Self> {
        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            published_year: row.get(3)?,
            summary: row.get::<Option<String>>(4)?,
        })
    }

    pub fn fields(&self) -> BookInput {
        BookInput {
            title: self.title.clone(),
            author: self.author.clone(),
            published_year: self.published_year,
            summary: self.summary.clone(),
        }
    }
}
