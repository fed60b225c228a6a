//! Trellis Core: the page model, request context, and lookup contracts.
//!
//! This crate holds everything menu builders depend on but do not own.
//! It has no internal Trellis dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`page`]: Page records, ids, and computed details
//! - [`context`]: Per-request state (path, active page, preview, time)
//! - [`permission`]: Visitor authorization
//! - [`url`]: Front end URL generation
//! - [`repository`]: Page lookups, in memory and cached
//! - [`strings`]: HTML escaping and e-mail obfuscation

#![doc = include_str!("../README.md")]

pub mod context;
pub mod error;
pub mod page;
pub mod permission;
pub mod repository;
pub mod strings;
pub mod url;

// Re-export key types at crate root for convenience
pub use context::RequestContext;
pub use error::{Error, Result};
pub use page::{GUESTS_GROUP, GroupId, Page, PageDetails, PageId, PageType, SitemapMode};
pub use permission::{PermissionChecker, ROLE_MEMBER, Visitor};
pub use repository::{
    CachedPageRepository, ChildPage, ChildQuery, MemoryPageRepository, PageRepository,
    PublishFilter,
};
pub use url::{AliasUrlGenerator, INDEX_ALIAS, UrlGenerator};
