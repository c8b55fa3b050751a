//! Entities module - record types served by the generic CRUD layer
//!
//! Each entity corresponds to a table in the database and implements
//! [`Entity`](crate::repositories::Entity).

pub mod author;
pub mod book;

pub use author::Author;
pub use book::Book;

/// Schema for the entities above, SQLite dialect
pub const SQLITE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS authors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL DEFAULT '',
        bio TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        author_id INTEGER REFERENCES authors (id) ON DELETE SET NULL,
        title TEXT NOT NULL DEFAULT '',
        published_year INTEGER
    )
    "#,
];

/// Schema for the entities above, MySQL dialect
///
/// Text columns are `VARCHAR`: MySQL sends `TEXT` as a blob, which the `Any`
/// driver cannot decode into a `String`.
pub const MYSQL_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS authors (
        id BIGINT PRIMARY KEY AUTO_INCREMENT,
        name VARCHAR(255) NOT NULL DEFAULT '',
        bio VARCHAR(2000) NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id BIGINT PRIMARY KEY AUTO_INCREMENT,
        author_id BIGINT NULL,
        title VARCHAR(255) NOT NULL DEFAULT '',
        published_year BIGINT NULL,
        FOREIGN KEY (author_id) REFERENCES authors (id) ON DELETE SET NULL
    )
    "#,
];
