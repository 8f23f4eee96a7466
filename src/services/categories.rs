//! Category endpoints of the backend

use async_trait::async_trait;

use crate::{error::AppResult, models::Category};

use super::ApiClient;

const CATEGORIES_PATH: &str = "/api/categories";

/// Category operations offered by the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryApi: Send + Sync {
    /// Fetch every category
    async fn list(&self) -> AppResult<Vec<Category>>;
    async fn create(&self, category: &Category) -> AppResult<Category>;
    async fn update(&self, id: i64, category: &Category) -> AppResult<Category>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[derive(Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryApi for CategoryService {
    async fn list(&self) -> AppResult<Vec<Category>> {
        self.client.get_json(CATEGORIES_PATH).await
    }

    async fn create(&self, category: &Category) -> AppResult<Category> {
        self.client.post_json(CATEGORIES_PATH, category).await
    }

    async fn update(&self, id: i64, category: &Category) -> AppResult<Category> {
        self.client
            .put_json(&format!("{}/{}", CATEGORIES_PATH, id), category)
            .await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.client
            .delete(&format!("{}/{}", CATEGORIES_PATH, id))
            .await
    }
}
