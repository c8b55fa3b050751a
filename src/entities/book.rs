//! Book entity - belongs to an author

use super::Author;
use crate::repositories::{Entity, RepositoryError, Value, load_by_ids};
use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use std::future::Future;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, sqlx::FromRow)]
#[serde(default)]
pub struct Book {
    pub id: i64,
    pub author_id: Option<i64>,
    pub title: String,
    pub published_year: Option<i64>,
    /// Filled by the `Author` preload
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

impl Entity for Book {
    const TABLE: &'static str = "books";
    const COLUMNS: &'static [&'static str] = &["author_id", "title", "published_year"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.author_id.into(),
            (&self.title).into(),
            self.published_year.into(),
        ]
    }

    fn preload<'a>(
        pool: &'a AnyPool,
        books: &'a mut [Self],
        association: &'a str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send + 'a {
        async move {
            match association {
                "Author" => {
                    let ids: Vec<i64> = books.iter().filter_map(|b| b.author_id).collect();
                    let authors: Vec<Author> = load_by_ids(pool, &ids).await?;
                    for book in books.iter_mut() {
                        book.author = authors
                            .iter()
                            .find(|a| Some(a.id) == book.author_id)
                            .cloned();
                    }
                    Ok(())
                }
                _ => Err(RepositoryError::unsupported_relation::<Self>(association)),
            }
        }
    }
}
