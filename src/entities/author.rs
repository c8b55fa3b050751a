//! Author entity - has many books

use super::Book;
use crate::repositories::{Entity, RepositoryError, Value, load_by_foreign_key};
use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use std::future::Future;

// Missing JSON fields decode to their zero value, so partial bodies bind.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, sqlx::FromRow)]
#[serde(default)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
    /// Filled by the `Books` preload
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub books: Vec<Book>,
}

impl Entity for Author {
    const TABLE: &'static str = "authors";
    const COLUMNS: &'static [&'static str] = &["name", "bio"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn values(&self) -> Vec<Value> {
        vec![(&self.name).into(), self.bio.clone().into()]
    }

    fn preload<'a>(
        pool: &'a AnyPool,
        authors: &'a mut [Self],
        association: &'a str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send + 'a {
        async move {
            match association {
                "Books" => {
                    let ids: Vec<i64> = authors.iter().map(|a| a.id).collect();
                    let books: Vec<Book> = load_by_foreign_key(pool, "author_id", &ids).await?;
                    for author in authors.iter_mut() {
                        author.books = books
                            .iter()
                            .filter(|b| b.author_id == Some(author.id))
                            .cloned()
                            .collect();
                    }
                    Ok(())
                }
                _ => Err(RepositoryError::unsupported_relation::<Self>(association)),
            }
        }
    }
}
