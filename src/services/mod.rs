//! HTTP services for the backend REST API
//!
//! Each call is a single independent request: no retry, no cache, and no
//! timeout beyond the optional transport timeout from configuration.

pub mod books;
pub mod categories;
#[cfg(test)]
pub(crate) mod test_server;

use std::{sync::Arc, time::Duration};

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{config::ApiConfig, error::{AppError, AppResult}};

/// Longest backend error body kept in an `AppError::Api` message
const MAX_ERROR_BODY: usize = 200;

pub use books::{BookApi, BookService};
pub use categories::{CategoryApi, CategoryService};

/// Thin JSON wrapper around a shared reqwest client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path such as `/api/books/3`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    /// GET with query parameters; absent fields produce no parameter
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!("GET {} {:?}", url, serde_json::to_value(query).ok());
        let response = self.client.get(&url).query(query).send().await?;
        decode(response).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        decode(response).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!("PUT {}", url);
        let response = self.client.put(&url).json(body).send().await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Backend answered {}: {}", status, body);
    Err(AppError::Api {
        status: status.as_u16(),
        message: body.trim().chars().take(MAX_ERROR_BODY).collect(),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub categories: Arc<dyn CategoryApi>,
    pub books: Arc<dyn BookApi>,
}

impl Services {
    /// Create HTTP-backed services for the configured backend
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = ApiClient::new(config)?;
        Ok(Self {
            categories: Arc::new(CategoryService::new(client.clone())),
            books: Arc::new(BookService::new(client)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use test_server::{serve_once, NOT_FOUND, NO_CONTENT};

    #[test]
    fn test_url_strips_trailing_slash() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: Some(5),
        })
        .unwrap();

        assert_eq!(client.url("/api/categories"), "http://localhost:8080/api/categories");
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let (client, request) = serve_once(NOT_FOUND).await;

        let err = client
            .get_json::<Vec<Category>>("/api/categories")
            .await
            .unwrap_err();
        match err {
            AppError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("expected api error, got {:?}", other),
        }
        assert!(request.await.unwrap().starts_with("GET /api/categories HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_long_error_body_is_truncated() {
        let body = "x".repeat(1000);
        let response = format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let (client, _request) = serve_once(response).await;

        let err = client.delete("/api/books/1").await.unwrap_err();
        match err {
            AppError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message.len(), MAX_ERROR_BODY);
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let (client, request) = serve_once(NO_CONTENT).await;

        client.delete("/api/categories/7").await.unwrap();
        assert!(request
            .await
            .unwrap()
            .starts_with("DELETE /api/categories/7 HTTP/1.1"));
    }
}
