//! Trellis CSP: Content-Security-Policy parsing and per-response headers.
//!
//! # Modules
//!
//! - [`directive`]: the directive catalogue and [`DirectiveSet`]
//! - [`parser`]: header parsing and source normalization
//! - [`handler`]: nonces, hashes, extra sources and header rendering
//! - [`error`]: error types

#![doc = include_str!("../README.md")]

pub mod directive;
pub mod error;
pub mod handler;
pub mod parser;

// Re-export key types at crate root for convenience
pub use directive::{DIRECTIVES, DirectiveKind, DirectiveSet, Signatures, directive_kind, fallback};
pub use error::{Error, Result};
pub use handler::{CspHandler, HEADER_NAME, HashAlgorithm, LEGACY_HEADER_NAME, RequestOrigin};
pub use parser::CspParser;
