//! Integration tests for link resolution.

use trellis_core::strings::encode_email;
use trellis_menu::BuildOptions;

use crate::common::{TestSite, find};

#[test]
fn test_root_links_to_start_page() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();
    assert_eq!(menu.uri.as_deref(), Some(""));
}

#[test]
fn test_regular_pages_link_to_alias() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();
    assert_eq!(find(&menu, "Team").unwrap().uri.as_deref(), Some("team.html"));
}

#[test]
fn test_mailto_redirect_is_obfuscated() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    let uri = find(&menu, "Contact").unwrap().uri.clone().unwrap();
    assert_ne!(uri, "mailto:info@example.com");
    assert!(!uri.contains('@'));
    assert_eq!(uri, encode_email("mailto:info@example.com"));

    let contact = find(&menu, "Contact").unwrap();
    assert_eq!(contact.extra_str("url"), Some(uri.as_str()));
    let exposed = serde_json::to_string(contact).unwrap();
    assert!(!exposed.contains("info@example.com"));
}

#[test]
fn test_forward_to_unpublished_target_is_not_displayed() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    let shortcut = find(&menu, "Shortcut").unwrap();
    assert!(!shortcut.display, "kept in the tree but not displayed");
    assert_eq!(shortcut.uri.as_deref(), Some("draft.html"));
}

#[test]
fn test_forward_to_unpublished_target_in_preview_is_displayed() {
    let site = TestSite::new().in_preview();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();
    assert!(find(&menu, "Shortcut").unwrap().display);
}

#[test]
fn test_forward_without_target_uses_first_child() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    let news = find(&menu, "News").unwrap();
    assert!(news.display);
    assert_eq!(news.uri.as_deref(), Some("latest.html"));
}

#[test]
fn test_link_title_attribute() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();
    assert_eq!(find(&menu, "About").unwrap().link_attribute("title"), Some("About"));
}
