//! Defaults shared by the memofetch crates.
//!
//! The cache defaults reproduce the sizing the fetch helper has always used:
//! 1000 entries per cache, refreshed every five minutes.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default maximum number of live entries per cache instance.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Default time-to-live for cached entries, in seconds (5 minutes).
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Diagnostics label for the URL → page body cache.
pub const PAGE_CACHE_NAME: &str = "page-content";

/// Diagnostics label for the URL → full response cache.
pub const RESPONSE_CACHE_NAME: &str = "http-response";

// ═══════════════════════════════════════════════════════════════════════════════
// CLIENT DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Charset used to decode response bodies when the server declares none.
pub const DEFAULT_CHARSET: &str = "utf-8";
