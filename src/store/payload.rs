use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::app_config::CmsConfig;
use crate::errors::StoreError;
use crate::locale::Locale;
use crate::store::{DocumentStore, FindQuery};

/// REST client for a Payload-style headless CMS
#[derive(Debug, Clone)]
pub struct PayloadStore {
    /// Base URL of the CMS, `/api` is appended per request
    base_url: Url,
    /// API key for the `users API-Key` authorization scheme
    api_key: Option<String>,
    /// HTTP client for making requests
    client: Client,
    /// Retries for connection failures
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Paginated collection response
#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    docs: Vec<Value>,
}

impl PayloadStore {
    /// Create a client from the CMS configuration
    pub fn from_config(config: &CmsConfig) -> Result<Self, StoreError> {
        let mut base_url = Url::parse(&config.endpoint)
            .map_err(|e| StoreError::RequestFailed(format!("Invalid endpoint '{}': {}", config.endpoint, e)))?;

        // Url::join drops the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| StoreError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            api_key: Some(config.api_key.clone()).filter(|key| !key.is_empty()),
            client,
            max_retries: config.retry_count,
            backoff_base_ms: config.retry_backoff_ms,
        })
    }

    /// URL for a global document
    pub fn global_url(&self, slug: &str, locale: Locale, depth: u8) -> Result<Url, StoreError> {
        let mut url = self.api_url(&["globals", slug])?;
        append_locale_and_depth(&mut url, locale, depth);
        Ok(url)
    }

    /// URL for a collection query
    pub fn find_url(&self, query: &FindQuery) -> Result<Url, StoreError> {
        let mut url = self.api_url(&[query.collection.as_str()])?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(filter) = &query.filter {
                pairs.append_pair(&format!("where[{}][equals]", filter.field), &filter.equals);
            }
            if let Some(sort) = &query.sort {
                pairs.append_pair("sort", sort);
            }
            if let Some(limit) = query.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        append_locale_and_depth(&mut url, query.locale, query.depth);
        Ok(url)
    }

    /// URL for a document by id
    pub fn by_id_url(&self, collection: &str, id: &str, locale: Locale, depth: u8) -> Result<Url, StoreError> {
        let mut url = self.api_url(&[collection, id])?;
        append_locale_and_depth(&mut url, locale, depth);
        Ok(url)
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self
            .base_url
            .join("api")
            .map_err(|e| StoreError::RequestFailed(format!("Invalid API url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::RequestFailed(format!("Endpoint cannot be a base: {}", self.base_url)))?
            .extend(segments);
        Ok(url)
    }

    /// GET a URL, retrying only connection failures
    ///
    /// # Returns
    /// * `Ok(None)` - The store answered 404
    async fn get_json(&self, url: Url) -> Result<Option<Value>, StoreError> {
        let mut attempt = 0;

        loop {
            debug!("GET {} (attempt {}/{})", url, attempt + 1, self.max_retries + 1);

            match self.send_once(url.clone()).await {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff_ms = backoff_delay_ms(self.backoff_base_ms, attempt);
                    warn!("Store unreachable ({}), retrying in {}ms", e, backoff_ms);
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
                result => return result,
            }
        }
    }

    async fn send_once(&self, url: Url) -> Result<Option<Value>, StoreError> {
        let mut request = self.client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("users API-Key {}", key));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                StoreError::ConnectionError(e.to_string())
            } else {
                StoreError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Store has no document at {}", url);
            return Ok(None);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::AuthenticationError(format!("{} for {}", status, url)));
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Store error ({}) for {}: {}", status, url, message);
            return Err(StoreError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::ParseError(e.to_string()))?;

        Ok(Some(value))
    }
}

fn append_locale_and_depth(url: &mut Url, locale: Locale, depth: u8) {
    url.query_pairs_mut()
        .append_pair("locale", locale.code())
        .append_pair("depth", &depth.to_string());
}

#[async_trait]
impl DocumentStore for PayloadStore {
    async fn find_global(&self, slug: &str, locale: Locale, depth: u8) -> Result<Option<Value>, StoreError> {
        let url = self.global_url(slug, locale, depth)?;
        self.get_json(url).await
    }

    async fn find(&self, query: &FindQuery) -> Result<Vec<Value>, StoreError> {
        let url = self.find_url(query)?;

        match self.get_json(url).await? {
            Some(body) => {
                let page: FindResponse =
                    serde_json::from_value(body).map_err(|e| StoreError::ParseError(e.to_string()))?;
                Ok(page.docs)
            }
            // Unknown collection
            None => Ok(Vec::new()),
        }
    }

    async fn find_by_id(&self, collection: &str, id: &str, locale: Locale, depth: u8) -> Result<Option<Value>, StoreError> {
        let url = self.by_id_url(collection, id, locale, depth)?;
        self.get_json(url).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut url = self.api_url(&["globals", "site-settings"])?;
        url.query_pairs_mut().append_pair("depth", "0");
        self.get_json(url).await.map(|_| ())
    }
}

/// Exponential backoff for a retry attempt (1-based), saturating at `u64::MAX`
fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    if base_ms == 0 {
        return 0;
    }
    1u64.checked_shl(attempt.saturating_sub(1))
        .and_then(|multiplier| base_ms.checked_mul(multiplier))
        .unwrap_or(u64::MAX)
}
