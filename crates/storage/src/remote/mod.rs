//! Hosted backend adapter.
//!
//! Talks to a PostgREST-style API (`/rest/v1/<table>`) exposing the
//! `user_progress` and `affiliate_products` tables. Rows are decoded into
//! private serde shapes and mapped into domain types before leaving this module.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use thiserror::Error;

use crate::repository::{
    LocalStateRepository, ProductRepository, ProgressRepository, Storage, StorageError,
};

mod products;
mod progress;
mod rows;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Public (anon) API key sent as `apikey`.
    pub api_key: String,
    /// Session access token of the signed-in user. Falls back to the API key.
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Read configuration from `METODO_REMOTE_*` variables.
    ///
    /// Returns `None` unless both the URL and the key are set and non-blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("METODO_REMOTE_URL").ok()?;
        let api_key = env::var("METODO_REMOTE_KEY").ok()?;
        if base_url.trim().is_empty() || api_key.trim().is_empty() {
            return None;
        }
        let access_token = env::var("METODO_REMOTE_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        let timeout = env::var("METODO_REMOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Some(Self::new(base_url, api_key, access_token, timeout))
    }

    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token,
            timeout,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteInitError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct RemoteRepository {
    http: Client,
    config: RemoteConfig,
}

impl RemoteRepository {
    /// Build the HTTP client for the hosted backend.
    ///
    /// # Errors
    ///
    /// Returns `RemoteInitError` if the TLS backend cannot be initialised.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteInitError> {
        let http = Client::builder()
            .user_agent(concat!("metodo-m/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.api_key);
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
    }

    fn get(&self, table: &str) -> RequestBuilder {
        self.authorized(self.http.get(self.config.table_url(table)))
    }

    fn post(&self, table: &str) -> RequestBuilder {
        self.authorized(self.http.post(self.config.table_url(table)))
    }
}

/// Map non-success statuses into `StorageError`, keeping a bounded slice of the body.
async fn check_status(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    tracing::warn!(%status, body = %body, "remote backend rejected request");

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StorageError::Unauthorized,
        StatusCode::NOT_FOUND => StorageError::NotFound,
        StatusCode::CONFLICT => StorageError::Conflict,
        _ => StorageError::Connection(format!("status {status}: {body}")),
    })
}

fn transport(err: reqwest::Error) -> StorageError {
    StorageError::Connection(err.to_string())
}

impl Storage {
    /// Progress and products from the hosted backend; client-local state from `local_state`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteInitError` if the HTTP client cannot be built.
    pub fn remote(
        config: RemoteConfig,
        local_state: Arc<dyn LocalStateRepository>,
    ) -> Result<Self, RemoteInitError> {
        let repo = RemoteRepository::new(config)?;
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let products: Arc<dyn ProductRepository> = Arc::new(repo);
        Ok(Self {
            progress,
            products,
            local_state,
        })
    }
}
