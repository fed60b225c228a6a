//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Trellis - page trees, navigation menus and CSP headers
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Page table to load instead of the configured one
    #[arg(long, global = true, env = "TRELLIS_PAGES")]
    pub pages_file: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the navigation menu below a page
    Menu(MenuArgs),
    /// Render the sitemap of a website
    Sitemap(SitemapArgs),
    /// Content-Security-Policy tools
    Csp {
        /// CSP action
        #[command(subcommand)]
        action: CspAction,
    },
    /// Configuration management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Output format of rendered trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented outline
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// The request a menu is rendered for.
#[derive(Args, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Request path (defaults to the URL of the active page)
    #[arg(long)]
    pub path: Option<String>,

    /// Id of the page being rendered
    #[arg(long)]
    pub active: Option<u32>,

    /// Render as a logged-in member
    #[arg(long)]
    pub member: bool,

    /// Member groups (implies --member)
    #[arg(long, value_delimiter = ',')]
    pub groups: Vec<i32>,

    /// Render in preview mode (unpublished pages are shown)
    #[arg(long)]
    pub preview: bool,
}

/// Arguments of `trellis menu`.
#[derive(Args, Debug, Clone, Default)]
pub struct MenuArgs {
    /// Parent page id (0 lists website roots)
    #[arg(long, default_value_t = 0)]
    pub root: u32,

    /// Explicit pages below the synthetic root (with --root 0)
    #[arg(long, value_delimiter = ',')]
    pub pages: Vec<u32>,

    /// Include hidden pages
    #[arg(long)]
    pub show_hidden: bool,

    /// Include protected pages the visitor cannot access
    #[arg(long)]
    pub show_protected: bool,

    /// Number of levels to display (0 = all)
    #[arg(long)]
    pub level: Option<u32>,

    /// Do not open deeper levels along the active trail
    #[arg(long)]
    pub hard_limit: bool,

    /// The request
    #[command(flatten)]
    pub request: RequestArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments of `trellis sitemap`.
#[derive(Args, Debug, Clone, Default)]
pub struct SitemapArgs {
    /// Page to start from (defaults to the website root of --active)
    #[arg(long)]
    pub root: Option<u32>,

    /// The request
    #[command(flatten)]
    pub request: RequestArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// CSP subcommands.
#[derive(Subcommand, Debug)]
pub enum CspAction {
    /// Parse a header value and print its directives
    Parse {
        /// Header value, e.g. "default-src self; img-src *"
        header: String,
    },
    /// Print the response headers of the configured policy
    Header {
        /// Policy to use instead of the configured one
        #[arg(long)]
        policy: Option<String>,

        /// Add a nonce to a directive (repeatable)
        #[arg(long)]
        nonce: Vec<String>,

        /// Send as report-only
        #[arg(long)]
        report_only: bool,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Get a configuration value by dotted key
    Get {
        /// Dotted key, e.g. "site.url_suffix"
        key: String,
    },
    /// Set a configuration value by dotted key
    Set {
        /// Dotted key, e.g. "menu.show_level"
        key: String,
        /// New value
        value: String,
    },
    /// Create a default configuration file
    Init {
        /// Where to write the file (defaults to the standard location)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
