//! Integration test modules.

mod menu;
mod sitemap;
