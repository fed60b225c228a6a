//! # trellis-cli
//!
//! Command-line tools for Trellis sites:
//! - Render the navigation menu or sitemap of a page table as seen by a
//!   given visitor
//! - Parse CSP headers and render the headers of a configured policy
//! - Manage the configuration file
//!
//! The binary is called `trellis`.

#![doc = include_str!("../README.md")]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use cli::{Cli, Command, ConfigAction, CspAction, OutputFormat};
pub use commands::run;
pub use config::TrellisConfig;
