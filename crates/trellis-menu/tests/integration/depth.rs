//! Integration tests for depth limits.

use trellis_menu::BuildOptions;

use crate::common::{TestSite, find};

#[test]
fn test_unlimited_depth_displays_everything() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default()).unwrap();
    assert!(menu.walk().all(|item| item.display_children));
}

#[test]
fn test_show_level_collapses_deeper_levels() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default().with_show_level(1)).unwrap();

    assert!(menu.display_children);
    let about = find(&menu, "About").unwrap();
    assert!(!about.display_children);
    assert!(find(&menu, "Lead").is_some(), "collapsed children stay in the tree");
}

#[test]
fn test_active_trail_opens_levels() {
    let site = TestSite::new().visiting("/lead.html", 5);
    let menu = site.menu(1, &BuildOptions::default().with_show_level(1)).unwrap();

    assert!(find(&menu, "About").unwrap().display_children);
    assert!(find(&menu, "Team").unwrap().display_children);
    assert!(!find(&menu, "News").unwrap().display_children);
}

#[test]
fn test_hard_limit_keeps_levels_closed() {
    let site = TestSite::new().visiting("/lead.html", 5);
    let options = BuildOptions::default().with_show_level(1).with_hard_limit(true);
    let menu = site.menu(1, &options).unwrap();

    assert!(!find(&menu, "About").unwrap().display_children);
    assert!(!find(&menu, "Team").unwrap().display_children);
}

#[test]
fn test_submenu_class_requires_displayed_children() {
    let site = TestSite::new();
    let menu = site.menu(1, &BuildOptions::default().with_show_level(1)).unwrap();
    let about = find(&menu, "About").unwrap();
    assert!(!about.extra_str("class").unwrap().contains("submenu"));
}
