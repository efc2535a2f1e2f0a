//! # Memofetch Core
//!
//! Core types, errors, and traits for the memofetch HTTP fetch helper.
//!
//! This crate provides the foundational building blocks used by the other
//! memofetch crates:
//!
//! - **Types**: The [`HttpResponse`] domain model and header multimap
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Cache and client defaults
//! - **Traits**: Common interfaces for extensibility
//!
//! ## Example
//!
//! ```rust
//! use memofetch_core::{HttpResponse, FetchError};
//!
//! // Types are serializable and well-documented
//! let response = HttpResponse::default();
//! let json = serde_json::to_string(&response).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{FetchError, Result};
pub use traits::*;
pub use types::*;
