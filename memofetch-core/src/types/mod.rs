//! Domain types for memofetch.
//!
//! This module provides the data structures shared across the workspace:
//!
//! - [`HttpResponse`]: A downloaded page body together with its headers
//! - [`HeaderMap`]: The header multimap both responses and HEAD requests use

mod response;

pub use response::*;
