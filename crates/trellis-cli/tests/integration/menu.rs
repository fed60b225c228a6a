//! `trellis menu` rendering.

use crate::common::{TestSite, json_child_names};
use trellis_cli::OutputFormat;
use trellis_cli::cli::{MenuArgs, RequestArgs};
use trellis_cli::commands::render_menu;

fn menu_args(root: u32) -> MenuArgs {
    MenuArgs {
        root,
        ..MenuArgs::default()
    }
}

#[test]
fn test_guest_menu_outline() {
    let site = TestSite::new();
    let out = render_menu(&site.config, None, &menu_args(1)).unwrap();

    assert!(out.contains("\n  Home -> home.html"));
    assert!(out.contains("\n  About -> about.html"));
    assert!(out.contains("\n    Team -> team.html"));
    assert!(!out.contains("Archive"), "hidden pages are left out");
    assert!(!out.contains("Members"), "protected pages are left out");
}

#[test]
fn test_member_sees_protected_page() {
    let site = TestSite::new();
    let args = MenuArgs {
        request: RequestArgs {
            groups: vec![1],
            ..RequestArgs::default()
        },
        ..menu_args(1)
    };

    let out = render_menu(&site.config, None, &args).unwrap();
    assert!(out.contains("Members -> members.html"));
}

#[test]
fn test_active_page_and_trail() {
    let site = TestSite::new();
    let args = MenuArgs {
        request: RequestArgs {
            active: Some(4),
            ..RequestArgs::default()
        },
        format: OutputFormat::Json,
        ..menu_args(1)
    };

    let out = render_menu(&site.config, None, &args).unwrap();
    let menu: serde_json::Value = serde_json::from_str(&out).unwrap();

    let about = &menu["children"][1];
    assert_eq!(about["name"], "About");
    assert_eq!(about["extras"]["is_trail"], true);
    assert_eq!(about["current"], false);

    let team = &about["children"][0];
    assert_eq!(team["uri"], "team.html");
    assert_eq!(team["current"], true);
    assert_eq!(team["extras"]["is_active"], true);
}

#[test]
fn test_show_hidden_and_level() {
    let site = TestSite::new();
    let args = MenuArgs {
        show_hidden: true,
        level: Some(1),
        format: OutputFormat::Json,
        ..menu_args(1)
    };

    let out = render_menu(&site.config, None, &args).unwrap();
    let menu: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json_child_names(&menu), vec!["Home", "About", "Archive"]);
    assert_eq!(menu["display_children"], true);
    assert_eq!(menu["children"][1]["display_children"], false);
}

#[test]
fn test_explicit_pages_below_synthetic_root() {
    let site = TestSite::new();
    let args = MenuArgs {
        pages: vec![3, 2],
        format: OutputFormat::Json,
        ..menu_args(0)
    };

    let out = render_menu(&site.config, None, &args).unwrap();
    let menu: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(menu["name"], "root");
    assert_eq!(json_child_names(&menu), vec!["About", "Home"]);
}

#[test]
fn test_pages_file_override() {
    let site = TestSite::new();
    let mut config = site.config.clone();
    config.site.pages_file = "/nonexistent/pages.toml".into();

    assert!(render_menu(&config, None, &menu_args(1)).is_err());
    assert!(render_menu(&config, Some(&site.pages_file), &menu_args(1)).is_ok());
}

#[test]
fn test_missing_pages_file() {
    let site = TestSite::new();
    let mut config = site.config.clone();
    config.site.pages_file = "/nonexistent/pages.toml".into();

    let err = render_menu(&config, None, &menu_args(1)).unwrap_err();
    assert!(err.to_string().contains("Unable to load the page table"));
}

#[test]
fn test_unknown_root_and_active_page() {
    let site = TestSite::new();
    assert!(render_menu(&site.config, None, &menu_args(99)).is_err());

    let args = MenuArgs {
        request: RequestArgs {
            active: Some(99),
            ..RequestArgs::default()
        },
        ..menu_args(1)
    };
    let err = render_menu(&site.config, None, &args).unwrap_err();
    assert!(err.to_string().contains("Active page 99 does not exist"));
}
