//! `trellis sitemap` rendering.

use crate::common::{TestSite, json_child_names};
use trellis_cli::OutputFormat;
use trellis_cli::cli::{RequestArgs, SitemapArgs};
use trellis_cli::commands::render_sitemap;

#[test]
fn test_sitemap_of_active_website() {
    let site = TestSite::new();
    let args = SitemapArgs {
        request: RequestArgs {
            active: Some(4),
            ..RequestArgs::default()
        },
        format: OutputFormat::Json,
        ..SitemapArgs::default()
    };

    let out = render_sitemap(&site.config, None, &args).unwrap();
    let tree: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(tree["name"], "Example");
    assert_eq!(json_child_names(&tree), vec!["Home", "About"]);
    assert_eq!(tree["children"][1]["children"][0]["current"], false);
}

#[test]
fn test_sitemap_without_root_or_active_page() {
    let site = TestSite::new();
    let out = render_sitemap(&site.config, None, &SitemapArgs::default()).unwrap();

    assert_eq!(out, "root\n", "website roots are never listed as children");
}

#[test]
fn test_sitemap_outline_is_fully_expanded() {
    let site = TestSite::new();
    let mut config = site.config.clone();
    config.menu.show_level = 1;
    let args = SitemapArgs {
        root: Some(1),
        ..SitemapArgs::default()
    };

    let out = render_sitemap(&config, None, &args).unwrap();
    assert!(out.contains("\n    Team -> team.html"));
    assert!(!out.contains("collapsed"));
}

#[test]
fn test_sitemap_explicit_root() {
    let site = TestSite::new();
    let args = SitemapArgs {
        root: Some(3),
        ..SitemapArgs::default()
    };

    let out = render_sitemap(&site.config, None, &args).unwrap();
    assert!(out.starts_with("About -> about.html"));
    assert!(!out.contains("Home"));
}
