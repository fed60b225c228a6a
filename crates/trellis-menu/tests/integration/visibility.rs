//! Integration tests for visibility and access rules.

use trellis_menu::BuildOptions;

use crate::common::{TestSite, child_names, find};

#[test]
fn test_published_children_in_sort_order() {
    let site = TestSite::new();
    let about = site.menu(3, &BuildOptions::default()).unwrap();

    assert_eq!(child_names(&about), vec!["Team", "History", "Jobs"]);
}

#[test]
fn test_show_hidden_includes_hidden_children() {
    let site = TestSite::new();
    let options = BuildOptions::default().with_show_hidden(true);
    let about = site.menu(3, &options).unwrap();

    assert_eq!(child_names(&about), vec!["Team", "Partners", "History", "Jobs"]);
}

#[test]
fn test_top_level_for_guests() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    assert_eq!(
        child_names(&menu),
        vec!["Home", "About", "Contact", "Shortcut", "News", "Company"]
    );
}

#[test]
fn test_protected_pages_absent_without_group() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();
    assert!(find(&menu, "Members").is_none());
    assert!(find(&menu, "Board").is_none());

    let outsider = TestSite::new().as_member(vec![2]);
    let menu = outsider.menu(1, &BuildOptions::default()).unwrap();
    assert!(find(&menu, "Members").is_none());
}

#[test]
fn test_protected_pages_visible_to_group_members() {
    let site = TestSite::new().as_member(vec![1]);
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    let members = find(&menu, "Members").unwrap();
    assert_eq!(child_names(members), vec!["Board"]);
    assert!(members.extra_str("class").unwrap().contains("protected"));

    let board = find(&menu, "Board").unwrap();
    assert_eq!(board.extra("protected"), Some(&serde_json::Value::Bool(true)));
}

#[test]
fn test_protected_root_of_menu_yields_none() {
    let site = TestSite::new();
    assert!(site.menu(8, &BuildOptions::default()).is_none());
    assert!(site.menu(9, &BuildOptions::default()).is_none(), "protection is inherited");
}

#[test]
fn test_preview_shows_unpublished_and_scheduled() {
    let site = TestSite::new().in_preview();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();

    let names = child_names(&menu);
    assert!(names.contains(&"Draft"));
    assert!(names.contains(&"Scheduled"));
}

#[test]
fn test_unknown_root_yields_none() {
    let site = TestSite::new();
    assert!(site.menu(999, &BuildOptions::default()).is_none());
}

#[test]
fn test_rebuild_is_identical() {
    let site = TestSite::new().visiting("/lead.html", 5);
    let options = BuildOptions::default().with_show_level(2);

    let first = site.menu(1, &options).unwrap();
    let second = site.menu(1, &options).unwrap();
    assert_eq!(first, second);

    let builder = site.builder();
    let third = builder.get_menu(trellis_core::PageId::new(1), &options).unwrap();
    assert_eq!(first, third);
}
