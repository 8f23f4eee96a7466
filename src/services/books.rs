//! Book endpoints of the backend

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookQuery},
};

use super::ApiClient;

const BOOKS_PATH: &str = "/api/books";

/// Book operations offered by the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookApi: Send + Sync {
    /// Fetch books, filtered by `search` and `categoryId` when set
    async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>>;
    async fn create(&self, book: &Book) -> AppResult<Book>;
    async fn update(&self, id: i64, book: &Book) -> AppResult<Book>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[derive(Clone)]
pub struct BookService {
    client: ApiClient,
}

impl BookService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookApi for BookService {
    async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.client.get_json_with_query(BOOKS_PATH, query).await
    }

    async fn create(&self, book: &Book) -> AppResult<Book> {
        self.client.post_json(BOOKS_PATH, book).await
    }

    async fn update(&self, id: i64, book: &Book) -> AppResult<Book> {
        self.client
            .put_json(&format!("{}/{}", BOOKS_PATH, id), book)
            .await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("{}/{}", BOOKS_PATH, id)).await
    }
}
