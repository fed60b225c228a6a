//! Plain text rendering of menu trees.

use crate::builder::EXTRA_CLASS;
use crate::item::MenuItem;
use std::fmt::Write;

/// Renders a menu tree as an indented outline, one item per line.
///
/// Each line shows the item name and link, followed by its CSS classes and
/// markers for items that are not displayed (`hidden`) or whose children
/// are not displayed (`collapsed`). Collapsed children are still listed.
///
/// ```
/// use trellis_menu::{MenuItem, render_outline};
///
/// let mut root = MenuItem::new("root");
/// root.add_child(MenuItem::new("About").with_uri("about.html"));
///
/// assert_eq!(render_outline(&root), "root\n  About -> about.html\n");
/// ```
pub fn render_outline(item: &MenuItem) -> String {
    let mut out = String::new();
    write_item(&mut out, item, 0);
    out
}

fn write_item(out: &mut String, item: &MenuItem, depth: usize) {
    let mut line = format!("{:indent$}{}", "", item.name, indent = depth * 2);

    if let Some(uri) = &item.uri {
        // Writing to a String cannot fail.
        let _ = write!(line, " -> {uri}");
    }

    let mut markers = Vec::new();
    if let Some(class) = item.extra_str(EXTRA_CLASS).filter(|class| !class.is_empty()) {
        markers.push(class.to_string());
    }
    if !item.display {
        markers.push("hidden".to_string());
    }
    if item.has_children() && !item.display_children {
        markers.push("collapsed".to_string());
    }
    if !markers.is_empty() {
        let _ = write!(line, "  [{}]", markers.join(", "));
    }

    out.push_str(&line);
    out.push('\n');

    for child in &item.children {
        write_item(out, child, depth + 1);
    }
}
