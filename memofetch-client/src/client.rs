//! Memoizing HTTP client implementation.
//!
//! The client owns its caches and is passed explicitly to whatever performs
//! fetches; construct one per process (or per test) instead of reaching for
//! shared global state.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use memofetch_cache::{CacheConfig, CacheStats, ExpiringCache};
use memofetch_core::constants::{
    DEFAULT_CHARSET, DEFAULT_TIMEOUT_SECONDS, PAGE_CACHE_NAME, RESPONSE_CACHE_NAME,
};
use memofetch_core::error::{FetchError, Result};
use memofetch_core::traits::PageFetcher;
use memofetch_core::types::{HeaderMap, HttpResponse};

/// Client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Charset used to decode bodies when the server declares none
    pub default_charset: String,
    /// Whether to memoize GET results
    pub enable_cache: bool,
    /// URL → page body cache settings
    pub page_cache: CacheConfig,
    /// URL → full response cache settings
    pub response_cache: CacheConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            default_charset: DEFAULT_CHARSET.into(),
            enable_cache: true,
            page_cache: CacheConfig::named(PAGE_CACHE_NAME),
            response_cache: CacheConfig::named(RESPONSE_CACHE_NAME),
        }
    }
}

impl ClientConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Disables memoization.
    pub fn no_cache(mut self) -> Self {
        self.enable_cache = false;
        self
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// HTTP client with memoized GET requests.
///
/// Two independently configured cache instances back the two fetch shapes:
/// one maps URL → page body, the other URL → body + headers. Cache keys are
/// the URL string, so an authenticated fetch and a plain fetch of the same
/// URL share an entry.
pub struct HttpClient {
    config: ClientConfig,
    http_client: reqwest::Client,
    page_cache: Option<ExpiringCache<String, String>>,
    response_cache: Option<ExpiringCache<String, HttpResponse>>,
}

impl HttpClient {
    /// Creates a client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with custom configuration.
    ///
    /// # Errors
    ///
    /// [`FetchError::ConfigError`] if a cache is configured with zero
    /// capacity or a zero TTL, or the underlying HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FetchError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        let (page_cache, response_cache) = if config.enable_cache {
            (
                Some(ExpiringCache::with_config(config.page_cache.clone())?),
                Some(ExpiringCache::with_config(config.response_cache.clone())?),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            config,
            http_client,
            page_cache,
            response_cache,
        })
    }

    /// Downloads a web page, serving repeated requests from the cache.
    #[instrument(skip(self, headers))]
    pub async fn get(&self, url: &str, headers: Option<&HashMap<String, String>>) -> Result<String> {
        self.get_internal(url, headers, None).await
    }

    /// Downloads a web page with HTTP basic auth credentials.
    ///
    /// The cache key is still the URL alone; a page fetched with credentials
    /// is served from the cache on later plain fetches of the same URL.
    #[instrument(skip(self, headers, pass))]
    pub async fn get_with_auth(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
        user: &str,
        pass: &str,
    ) -> Result<String> {
        self.get_internal(url, headers, Some((user, pass))).await
    }

    async fn get_internal(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
        auth: Option<(&str, &str)>,
    ) -> Result<String> {
        if let Some(cache) = &self.page_cache {
            if let Some(body) = cache.get(url) {
                debug!(url, "page found in cache");
                return Ok(body);
            }
        }

        debug!(url, "downloading page");
        let response = self.send(self.http_client.get(url), headers, auth).await?;
        let response = check_status(url, response)?;
        let body = self.decode_body(response).await?;

        if let Some(cache) = &self.page_cache {
            cache.put(url.to_string(), body.clone());
        }
        Ok(body)
    }

    /// Downloads a web page and its headers, serving repeats from the cache.
    #[instrument(skip(self, headers))]
    pub async fn get_response(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse> {
        if let Some(cache) = &self.response_cache {
            if let Some(response) = cache.get(url) {
                debug!(url, "response found in cache");
                return Ok(response);
            }
        }

        debug!(url, "downloading page");
        let response = self.send(self.http_client.get(url), headers, None).await?;
        let response = check_status(url, response)?;
        let header_map = header_multimap(response.headers());
        let body = self.decode_body(response).await?;
        let http_response = HttpResponse::new(body, header_map);

        if let Some(cache) = &self.response_cache {
            cache.put(url.to_string(), http_response.clone());
        }
        Ok(http_response)
    }

    /// Sends a POST request and returns the response body. Never cached.
    #[instrument(skip(self, headers, body))]
    pub async fn post(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
        body: Vec<u8>,
    ) -> Result<String> {
        debug!(url, "posting request");
        let request = self.http_client.post(url).body(body);
        let response = self.send(request, headers, None).await?;
        let response = check_status(url, response)?;
        self.decode_body(response).await
    }

    /// Sends a HEAD request and returns the response headers. Never cached.
    ///
    /// Headers are returned for error statuses too, so callers probing a URL
    /// get whatever the server said about it.
    #[instrument(skip(self, headers))]
    pub async fn head(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<HeaderMap> {
        debug!(url, "requesting headers");
        let response = self.send(self.http_client.head(url), headers, None).await?;
        Ok(header_multimap(response.headers()))
    }

    /// Drops any cached entries for a URL, forcing the next GET to refetch.
    pub fn invalidate(&self, url: &str) {
        if let Some(cache) = &self.page_cache {
            cache.invalidate(url);
        }
        if let Some(cache) = &self.response_cache {
            cache.invalidate(url);
        }
    }

    /// Clears both caches.
    pub fn clear_caches(&self) {
        if let Some(cache) = &self.page_cache {
            cache.clear();
        }
        if let Some(cache) = &self.response_cache {
            cache.clear();
        }
    }

    /// Statistics for the page body cache, if caching is enabled.
    pub fn page_cache_stats(&self) -> Option<CacheStats> {
        self.page_cache.as_ref().map(|cache| cache.stats())
    }

    /// Statistics for the full response cache, if caching is enabled.
    pub fn response_cache_stats(&self) -> Option<CacheStats> {
        self.response_cache.as_ref().map(|cache| cache.stats())
    }

    async fn send(
        &self,
        mut request: reqwest::RequestBuilder,
        headers: Option<&HashMap<String, String>>,
        auth: Option<(&str, &str)>,
    ) -> Result<reqwest::Response> {
        if let Some(headers) = headers {
            for (name, value) in headers {
                request = request.header(name, value);
            }
        }
        if let Some((user, pass)) = auth {
            request = request.basic_auth(user, Some(pass));
        }
        request.send().await.map_err(transport_error)
    }

    async fn decode_body(&self, response: reqwest::Response) -> Result<String> {
        response
            .text_with_charset(&self.config.default_charset)
            .await
            .map_err(|e| FetchError::EncodingError(e.to_string()))
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.get(url, None).await
    }

    async fn fetch_response(&self, url: &str) -> Result<HttpResponse> {
        self.get_response(url, None).await
    }
}

fn check_status(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    if !response.status().is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::ConnectionTimeout(err.to_string())
    } else if err.is_builder() {
        FetchError::InvalidUrl(err.to_string())
    } else {
        FetchError::HttpError(err.to_string())
    }
}

fn header_multimap(headers: &reqwest::header::HeaderMap) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in headers.iter() {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}
