//! Storecast REST API client.
//!
//! Uses reqwest to call the server endpoints. Implements
//! [`MessageBackend`] so the submission workflow runs unchanged against a
//! live server.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use storecast_core::api::{CreateMessageRequest, ErrorBody, LoginRequest, LoginResponse};
use storecast_core::{BackendError, Message, MessageBackend, NewMessage, Store};

/// Configuration for connecting to a storecast server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server URL (e.g., "http://127.0.0.1:8080").
    pub base_url: String,
    /// Bearer token from a prior login, if any.
    pub token: Option<String>,
}

/// Storecast REST API client.
#[derive(Debug)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a new API client.
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        if config.base_url.is_empty() {
            return Err(BackendError::Config("base_url is empty".into()));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| BackendError::Config("Invalid token format".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        // Ensure a TLS crypto provider is installed (reqwest uses rustls-no-provider).
        // The `Err` case just means it was already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(transport)?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Build the API URL for a given path.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Check HTTP response status, extracting the server's error payload
    /// for non-success codes.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown").into(),
        };
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Log in and obtain a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError> {
        let url = self.api_url("/login");
        let resp = self
            .http
            .post(&url)
            .json(&LoginRequest {
                email: email.into(),
                password: password.into(),
            })
            .send()
            .await
            .map_err(transport)?;
        let resp = Self::check_status(resp).await?;
        resp.json().await.map_err(transport)
    }

    /// Revoke the session behind this client's bearer token.
    pub async fn logout(&self) -> Result<(), BackendError> {
        let url = self.api_url("/logout");
        let resp = self.http.post(&url).send().await.map_err(transport)?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// List messages, newest first.
    pub async fn list_messages(&self) -> Result<Vec<Message>, BackendError> {
        let url = self.api_url("/messages");
        let resp = self.http.get(&url).send().await.map_err(transport)?;
        let resp = Self::check_status(resp).await?;
        resp.json().await.map_err(transport)
    }

    /// Get a single message by id.
    pub async fn get_message(&self, id: &str) -> Result<Message, BackendError> {
        let url = self.api_url(&format!("/messages/{id}"));
        let resp = self.http.get(&url).send().await.map_err(transport)?;
        let resp = Self::check_status(resp).await?;
        resp.json().await.map_err(transport)
    }
}

#[async_trait]
impl MessageBackend for HttpBackend {
    async fn list_stores(&self) -> Result<Vec<Store>, BackendError> {
        let url = self.api_url("/stores");
        let resp = self.http.get(&url).send().await.map_err(transport)?;
        let resp = Self::check_status(resp).await?;
        resp.json().await.map_err(transport)
    }

    async fn insert_message(&self, message: &NewMessage) -> Result<Message, BackendError> {
        let url = self.api_url("/messages");
        let req = CreateMessageRequest {
            title: message.title.clone(),
            body: message.body.clone(),
            store_selection_type: message.store_selection_type,
            stores: message.stores.clone(),
        };
        let resp = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(transport)?;
        let resp = Self::check_status(resp).await?;
        resp.json().await.map_err(transport)
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_url_returns_config_error() {
        let config = ClientConfig {
            base_url: String::new(),
            token: None,
        };
        let err = HttpBackend::new(&config).unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }

    #[test]
    fn valid_config_creates_client() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:8080".into(),
            token: None,
        };
        assert!(HttpBackend::new(&config).is_ok());
    }

    #[test]
    fn bearer_token_is_accepted() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:8080".into(),
            token: Some("0b1f4a7c-9d2e-4f16-8a63-2f90cc01de44".into()),
        };
        assert!(HttpBackend::new(&config).is_ok());
    }

    #[test]
    fn token_with_control_characters_returns_config_error() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:8080".into(),
            token: Some("tok\nen".into()),
        };
        let err = HttpBackend::new(&config).unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }

    #[test]
    fn trailing_slash_stripped_from_base_url() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:8080/".into(),
            token: None,
        };
        let client = HttpBackend::new(&config).unwrap();
        let url = client.api_url("/messages");
        assert!(url.starts_with("http://127.0.0.1:8080/api"));
        assert!(!url.contains("//api"));
    }

    #[test]
    fn api_url_constructed_correctly() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:8080".into(),
            token: None,
        };
        let client = HttpBackend::new(&config).unwrap();
        assert_eq!(
            client.api_url("/messages/m1"),
            "http://127.0.0.1:8080/api/messages/m1"
        );
    }
}
