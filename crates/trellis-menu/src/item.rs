//! Menu tree nodes.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One node of a navigation tree.
///
/// Items are created fresh for every build and owned by whoever receives
/// the finished tree. `display` and `display_children` are rendering hints:
/// items that should not be shown stay in the tree so that listeners and
/// templates still see the full structure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MenuItem {
    /// Label of the item (the page title).
    pub name: String,
    /// Link target, relative to the site base.
    pub uri: Option<String>,
    /// Whether the item should be rendered.
    pub display: bool,
    /// Whether the children of this item should be rendered.
    pub display_children: bool,
    /// Whether this item represents the page being rendered.
    pub current: bool,
    /// Attributes for the rendered link element.
    pub link_attributes: BTreeMap<String, String>,
    /// Arbitrary metadata for templates and listeners.
    pub extras: BTreeMap<String, Value>,
    /// Child items in display order.
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Creates a displayed item without link or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: None,
            display: true,
            display_children: true,
            current: false,
            link_attributes: BTreeMap::new(),
            extras: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets the link target.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Appends a child item.
    pub fn add_child(&mut self, child: MenuItem) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Whether the item has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the first direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&MenuItem> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns an extra value.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }

    /// Returns an extra value as a boolean (`false` when missing).
    pub fn extra_flag(&self, key: &str) -> bool {
        self.extras
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Returns an extra value as a string slice.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extras.get(key).and_then(Value::as_str)
    }

    /// Sets an extra value.
    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Returns a link attribute.
    pub fn link_attribute(&self, name: &str) -> Option<&str> {
        self.link_attributes.get(name).map(String::as_str)
    }

    /// Sets a link attribute.
    pub fn set_link_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.link_attributes.insert(name.into(), value.into());
        self
    }

    /// Iterates over this item and all descendants, depth first.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Returns the first item in the subtree matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&MenuItem) -> bool) -> Option<&MenuItem> {
        self.walk().find(|item| predicate(item))
    }

    /// Number of items in the subtree, this item included.
    pub fn count(&self) -> usize {
        self.walk().count()
    }
}

/// Depth-first iterator over a menu tree, see [`MenuItem::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a MenuItem>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a MenuItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        self.stack.extend(item.children.iter().rev());
        Some(item)
    }
}

// ============================================================================
// Tests
// ============================================================================
