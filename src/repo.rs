//! Data access for the `books` table.
//!
//! Every operation is a single statement, so the lookup and the mutation it
//! implies commit together. Absence is reported as `Ok(None)`, never as an error.

use anyhow::Result;
use libsql::Connection;

use crate::model::{BOOK_COLUMNS, BOOKS_TABLE, Book, BookInput};

pub struct BookRepository<'a> {
    conn: &'a Connection,
}

impl<'a> BookRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM {BOOKS_TABLE} ORDER BY id");

        let mut rows = self.conn.query(&query, ()).await?;
        let mut books = Vec::new();

        while let Some(row) = rows.next().await? {
            books.push(Book::from_row(&row)?);
        }

        Ok(books)
    }

    pub async fn get_book(&self, id: i64) -> Result<Option<Book>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM {BOOKS_TABLE} WHERE id = ?");

        let mut rows = self.conn.query(&query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Book::from_row(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn create_book(&self, input: BookInput) -> Result<Book> {
        let query = format!(
            r#"
            INSERT INTO {BOOKS_TABLE} (title, author, published_year, summary)
            VALUES (?, ?, ?, ?)
            RETURNING {BOOK_COLUMNS}
            "#
        );

        let mut rows = self
            .conn
            .query(
                &query,
                libsql::params![input.title, input.author, input.published_year, input.summary],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Book::from_row(&row)?)
        } else {
            anyhow::bail!("Failed to create book")
        }
    }

    /// Overwrites every field of the book. Fields the caller leaves out of
    /// `input` (only `summary` can be left out) are cleared.
    pub async fn update_book(&self, id: i64, input: BookInput) -> Result<Option<Book>> {
        let query = format!(
            r#"
            UPDATE {BOOKS_TABLE}
            SET title = ?, author = ?, published_year = ?, summary = ?
            WHERE id = ?
            RETURNING {BOOK_COLUMNS}
            "#
        );

        let mut rows = self
            .conn
            .query(
                &query,
                libsql::params![input.title, input.author, input.published_year, input.summary, id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Book::from_row(&row)?))
        } else {
            Ok(None)
        }
    }

    /// Removes the book and hands back the row as it was before deletion.
    pub async fn delete_book(&self, id: i64) -> Result<Option<Book>> {
        let query = format!("DELETE FROM {BOOKS_TABLE} WHERE id = ? RETURNING {BOOK_COLUMNS}");

        let mut rows = self.conn.query(&query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Book::from_row(&row)?))
        } else {
            Ok(None)
        }
    }
}
