//! Integration tests for active and trail state.

use trellis_core::PageId;
use trellis_menu::{BuildOptions, EXTRA_CLASS, EXTRA_IS_ACTIVE, EXTRA_IS_TRAIL, MenuItem};

use crate::common::{TestSite, find};

fn class<'a>(menu: &'a MenuItem, name: &str) -> &'a str {
    find(menu, name).unwrap().extra_str(EXTRA_CLASS).unwrap()
}

#[test]
fn test_exactly_one_current_item() {
    let site = TestSite::new().visiting("/lead.html", 5);
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    let current: Vec<&str> = menu
        .walk()
        .filter(|item| item.current)
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(current, vec!["Lead"]);
    assert!(find(&menu, "Lead").unwrap().extra_flag(EXTRA_IS_ACTIVE));
}

#[test]
fn test_current_is_unique_when_listed_pages_overlap() {
    let site = TestSite::new().visiting("/team.html", 4);
    let options = BuildOptions::default().with_pages([PageId::new(3), PageId::new(4)]);
    let menu = site.menu(0, &options).unwrap();

    let teams: Vec<&MenuItem> = menu.walk().filter(|item| item.name == "Team").collect();
    assert_eq!(teams.len(), 2, "below About and listed itself");

    let current: Vec<&str> = menu
        .walk()
        .filter(|item| item.current)
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(current, vec!["Team"]);
    // The first occurrence in tree order keeps the flag.
    assert!(menu.children[0].children[0].current);
    assert!(!menu.children[1].current);
}

#[test]
fn test_strict_ancestors_are_trail() {
    let site = TestSite::new().visiting("/lead.html", 5);
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    let mut trail: Vec<&str> = menu
        .walk()
        .filter(|item| item.extra_flag(EXTRA_IS_TRAIL))
        .map(|item| item.name.as_str())
        .collect();
    trail.sort_unstable();
    assert_eq!(trail, vec!["About", "Example", "Team"]);
}

#[test]
fn test_query_string_is_ignored() {
    let site = TestSite::new().visiting("/lead.html?page=2", 5);
    let menu = site.menu(1, &BuildOptions::default()).unwrap();
    assert!(find(&menu, "Lead").unwrap().current);
}

#[test]
fn test_path_mismatch_is_not_active() {
    let site = TestSite::new().visiting("/somewhere-else.html", 5);
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    assert!(menu.walk().all(|item| !item.current));
    assert!(find(&menu, "Team").unwrap().extra_flag(EXTRA_IS_TRAIL));
}

#[test]
fn test_css_classes_along_the_trail() {
    let site = TestSite::new().visiting("/team.html", 4);
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    assert_eq!(class(&menu, "About"), "submenu trail");
    assert_eq!(class(&menu, "Team"), "submenu active");
    assert_eq!(class(&menu, "History"), "sibling");
    assert_eq!(class(&menu, "Home"), "");
}

#[test]
fn test_forward_to_active_page() {
    let site = TestSite::new().visiting("/about.html", 3);
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    let company = find(&menu, "Company").unwrap();
    assert_eq!(company.uri.as_deref(), Some("about.html"));
    assert!(company.extra_flag(EXTRA_IS_ACTIVE));
    assert!(!company.current, "only the page itself is current");
    assert_eq!(class(&menu, "Company"), "forward");

    assert!(find(&menu, "About").unwrap().current);
}
