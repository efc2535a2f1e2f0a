//! Common traits for memofetch.
//!
//! These traits define the interfaces that different implementations can
//! satisfy, enabling modularity and testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::HttpResponse;

/// Interface for memoized page retrieval.
///
/// Implementations might use:
/// - A real HTTP client with caching (production)
/// - A canned-response stub (for testing consumers without a network)
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page body for a URL.
    ///
    /// Implementations are expected to serve repeated requests for the same
    /// URL from a cache while the cached copy is fresh.
    async fn fetch_page(&self, url: &str) -> Result<String>;

    /// Fetches the full response (body + headers) for a URL.
    async fn fetch_response(&self, url: &str) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedFetcher;

    #[async_trait]
    impl PageFetcher for CannedFetcher {
        async fn fetch_page(&self, _url: &str) -> Result<String> {
            Ok("canned".into())
        }

        async fn fetch_response(&self, _url: &str) -> Result<HttpResponse> {
            Ok(HttpResponse::new("canned", Default::default()))
        }
    }

    #[tokio::test]
    async fn test_trait_object_usable() {
        let fetcher: Box<dyn PageFetcher> = Box::new(CannedFetcher);
        assert_eq!(fetcher.fetch_page("http://example.com").await.unwrap(), "canned");
        assert_eq!(
            fetcher.fetch_response("http://example.com").await.unwrap().body,
            "canned"
        );
    }
}
