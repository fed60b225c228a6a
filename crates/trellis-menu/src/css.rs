//! CSS classes of menu items.

use trellis_core::{Page, PageType};

/// Derives the CSS class string of a menu item.
///
/// Classes appear in a fixed order: `submenu`, `protected`, the page's own
/// class, `sibling`, `trail`, `forward`, `active`.
///
/// * `submenu`: the item has children and displays them
/// * `sibling`: same parent as the active page, but not active itself
/// * `trail`: on the active trail without being active, or an active
///   forward page that is on the trail
/// * `forward`: an active forward page (it points at the active page)
/// * `active`: the active page itself
pub fn css_class(
    page: &Page,
    active_page: Option<&Page>,
    is_active: bool,
    is_trail: bool,
    has_submenu: bool,
) -> String {
    let is_forward = active_page
        .is_some_and(|active| page.page_type == PageType::Forward && active.id == page.jump_to);

    let mut classes: Vec<&str> = Vec::new();

    if has_submenu {
        classes.push("submenu");
    }

    if page.protected {
        classes.push("protected");
    }

    if !page.css_class.is_empty() {
        classes.push(&page.css_class);
    }

    if active_page.is_some_and(|active| !is_active && page.pid == active.pid) {
        classes.push("sibling");
    }

    if (is_active && is_forward && is_trail) || (!is_active && is_trail) {
        classes.push("trail");
    }

    if is_active && is_forward {
        classes.push("forward");
    }

    if is_active && !is_forward {
        classes.push("active");
    }

    classes.join(" ")
}

// ============================================================================
// Tests
// ============================================================================
