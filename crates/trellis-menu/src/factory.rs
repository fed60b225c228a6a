//! Menu item creation.

use crate::item::MenuItem;

/// Creates menu items.
///
/// Builders never construct items directly, so that applications can
/// pre-populate every item (default attributes, extras) in one place.
pub trait MenuFactory {
    /// Creates an item labelled `name`.
    fn create_item(&self, name: &str) -> MenuItem;
}

/// Factory producing plain [`MenuItem`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMenuFactory;

impl MenuFactory for DefaultMenuFactory {
    fn create_item(&self, name: &str) -> MenuItem {
        MenuItem::new(name)
    }
}
