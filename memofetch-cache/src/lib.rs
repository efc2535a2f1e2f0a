//! Bounded TTL cache for memofetch.
//!
//! Generic in-memory key/value store with configurable capacity and
//! expiration, used to memoize downloaded pages and full HTTP responses.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{CacheConfig, CacheStats, ExpiringCache};
