//! HTTP Client
//!
//! Thin wrapper over `reqwest` that knows the backend base URL and turns
//! every failure into an `ApiError`.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("could not read file {0}")]
    FileRead(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// Client for the configured backend
    pub fn from_config() -> Self {
        Self::new(config::get().api_base.clone())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    async fn send(builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T> {
        let response = Self::send(self.request(Method::GET, path).query(query)).await?;
        Ok(response.json().await?)
    }

    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = Self::send(self.request(method, path).json(body)).await?;
        Ok(response.json().await?)
    }

    /// Request whose response body is ignored
    pub async fn send_no_content<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> ApiResult<()> {
        Self::send(self.request(method, path).json(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        Self::send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    pub async fn get_bytes(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Vec<u8>> {
        let response = Self::send(self.request(Method::GET, path).query(query)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn post_multipart(&self, path: &str, form: reqwest::multipart::Form) -> ApiResult<()> {
        Self::send(self.request(Method::POST, path).multipart(form)).await?;
        Ok(())
    }
}

/// Client for the configured backend
pub fn client() -> ApiClient {
    ApiClient::from_config()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:8080/api/");
        assert_eq!(client.url("/items/3"), "http://localhost:8080/api/items/3");
        assert_eq!(client.url("tags"), "http://localhost:8080/api/tags");
    }

    #[test]
    fn test_error_messages() {
        let e = ApiError::Status { status: 404, body: "not found".to_string() };
        assert_eq!(e.to_string(), "server responded with status 404");
    }
}
