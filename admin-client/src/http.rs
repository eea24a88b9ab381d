//! HTTP client for the admin REST API
//!
//! Attaches `Authorization: Bearer <token>` from the configured
//! [`TokenProvider`] and reports every 401 back to it. Single attempt per
//! call; there is no retry or backoff.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::response::ApiErrorBody;

use crate::session::TokenProvider;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    async fn get_with<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ClientResult<T>;
    /// GET bypassing intermediary caches (`Cache-Control: no-cache`)
    async fn get_fresh<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
}

/// Network HTTP client
#[derive(Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for NetworkHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkHttpClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenProvider>) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base URL must not be empty".into()));
        }
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if let Some(token) = self.tokens.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> ClientResult<T> {
        let response = req.send().await.inspect_err(|e| {
            tracing::warn!(%method, path, error = %e, "Request failed");
        })?;
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "Response received");

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, path, "401 from backend, clearing session");
            self.tokens.on_unauthorized();
        }

        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::error_for(status, &text));
        }

        // Some mutations answer with an empty body
        let body = if text.trim().is_empty() { "{}" } else { text.as_str() };
        serde_json::from_str(body).map_err(|e| {
            ClientError::InvalidResponse(format!("{method} {path}: {e}"))
        })
    }

    fn error_for(status: StatusCode, text: &str) -> ClientError {
        let message = serde_json::from_str::<ApiErrorBody>(text)
            .ok()
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                } else {
                    text.to_string()
                }
            });

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::GET, path);
        self.send(Method::GET, path, req).await
    }

    async fn get_with<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ClientResult<T> {
        let req = self.request(Method::GET, path).query(query);
        self.send(Method::GET, path, req).await
    }

    async fn get_fresh<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let req = self
            .request(Method::GET, path)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::PRAGMA, "no-cache")
            .header(reqwest::header::EXPIRES, "0");
        self.send(Method::GET, path, req).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, req).await
    }

    async fn post_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::POST, path);
        self.send(Method::POST, path, req).await
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, req).await
    }

    async fn patch<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::PATCH, path).json(body);
        self.send(Method::PATCH, path, req).await
    }

    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::DELETE, path);
        self.send(Method::DELETE, path, req).await
    }
}
