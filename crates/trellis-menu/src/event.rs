//! Post-build hooks.
//!
//! After each (sub)tree is built, the builder dispatches a [`MenuEvent`] to
//! every registered [`MenuListener`]. Listeners run innermost subtree first,
//! so by the time the root event fires every descendant has been seen.

use crate::factory::MenuFactory;
use crate::item::MenuItem;
use crate::options::BuildOptions;
use trellis_core::PageId;

/// A freshly built (sub)tree, open for modification.
pub struct MenuEvent<'a> {
    factory: &'a dyn MenuFactory,
    item: &'a mut MenuItem,
    pid: PageId,
    options: &'a BuildOptions,
}

impl<'a> MenuEvent<'a> {
    /// Creates an event for the subtree rooted at `pid`.
    pub fn new(
        factory: &'a dyn MenuFactory,
        item: &'a mut MenuItem,
        pid: PageId,
        options: &'a BuildOptions,
    ) -> Self {
        Self {
            factory,
            item,
            pid,
            options,
        }
    }

    /// Factory to create additional items with.
    pub fn factory(&self) -> &dyn MenuFactory {
        self.factory
    }

    /// The built subtree.
    pub fn item(&self) -> &MenuItem {
        self.item
    }

    /// The built subtree, mutably.
    pub fn item_mut(&mut self) -> &mut MenuItem {
        self.item
    }

    /// Page id the subtree was built for (0 for the synthetic root).
    pub fn pid(&self) -> PageId {
        self.pid
    }

    /// Options of the build.
    pub fn options(&self) -> &BuildOptions {
        self.options
    }
}

/// Receives [`MenuEvent`]s.
pub trait MenuListener {
    /// Called once per built (sub)tree.
    fn on_menu(&self, event: &mut MenuEvent<'_>);
}

impl<F> MenuListener for F
where
    F: Fn(&mut MenuEvent<'_>),
{
    fn on_menu(&self, event: &mut MenuEvent<'_>) {
        self(event)
    }
}

/// Ordered list of listeners.
///
/// # Example
///
/// ```
/// use trellis_menu::{MenuEvent, MenuEventDispatcher};
///
/// let dispatcher = MenuEventDispatcher::new()
///     .add(|event: &mut MenuEvent<'_>| {
///         event.item_mut().set_link_attribute("data-level", "top");
///     });
///
/// assert_eq!(dispatcher.len(), 1);
/// ```
#[derive(Default)]
pub struct MenuEventDispatcher {
    listeners: Vec<Box<dyn MenuListener>>,
}

impl MenuEventDispatcher {
    /// Creates a dispatcher without listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. Listeners run in registration order.
    #[allow(clippy::should_implement_trait)]
    pub fn add<L: MenuListener + 'static>(mut self, listener: L) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Runs every listener on `event`.
    pub fn dispatch(&self, event: &mut MenuEvent<'_>) {
        for listener in &self.listeners {
            listener.on_menu(event);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for MenuEventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuEventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
