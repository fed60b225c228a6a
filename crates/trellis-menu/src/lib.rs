//! Trellis Menu: navigation menus and sitemaps built from a page tree.
//!
//! # Modules
//!
//! - [`builder`]: the recursive [`FrontendMenuBuilder`]
//! - [`sitemap`]: sitemap mode on top of the builder
//! - [`item`]: menu tree nodes
//! - [`options`]: per-build settings
//! - [`event`]: post-build listeners
//! - [`factory`]: item creation
//! - [`css`]: CSS class derivation
//! - [`outline`]: plain text rendering

#![doc = include_str!("../README.md")]

pub mod builder;
pub mod css;
pub mod event;
pub mod factory;
pub mod item;
pub mod options;
pub mod outline;
pub mod sitemap;

// Re-export key types at crate root for convenience
pub use builder::{EXTRA_CLASS, EXTRA_IS_ACTIVE, EXTRA_IS_TRAIL, FrontendMenuBuilder};
pub use css::css_class;
pub use event::{MenuEvent, MenuEventDispatcher, MenuListener};
pub use factory::{DefaultMenuFactory, MenuFactory};
pub use item::MenuItem;
pub use options::BuildOptions;
pub use outline::render_outline;
pub use sitemap::Sitemap;
