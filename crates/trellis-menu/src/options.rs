//! Options for a single menu build.

use serde::{Deserialize, Serialize};
use trellis_core::PageId;

/// Settings for one [`FrontendMenuBuilder::get_menu`] call.
///
/// [`FrontendMenuBuilder::get_menu`]: crate::FrontendMenuBuilder::get_menu
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Include pages hidden from navigation.
    pub show_hidden: bool,
    /// Include protected pages the visitor has no access to.
    pub show_protected: bool,
    /// Number of levels whose children are displayed (0 = unlimited).
    pub show_level: u32,
    /// Do not open deeper levels along the active trail.
    pub hard_limit: bool,
    /// Build a sitemap instead of a navigation menu.
    pub is_sitemap: bool,
    /// Explicit children of the synthetic root (`pid` 0), in display order.
    pub pages: Vec<PageId>,
    /// Hide "guests only" pages from logged-in members (deprecated feature).
    pub honor_guests_only: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            show_protected: false,
            show_level: 0,
            hard_limit: false,
            is_sitemap: false,
            pages: Vec::new(),
            honor_guests_only: true,
        }
    }
}

impl BuildOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes hidden pages.
    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    /// Includes protected pages regardless of group membership.
    pub fn with_show_protected(mut self, show_protected: bool) -> Self {
        self.show_protected = show_protected;
        self
    }

    /// Limits the displayed depth.
    pub fn with_show_level(mut self, show_level: u32) -> Self {
        self.show_level = show_level;
        self
    }

    /// Applies the depth limit along the active trail too.
    pub fn with_hard_limit(mut self, hard_limit: bool) -> Self {
        self.hard_limit = hard_limit;
        self
    }

    /// Switches to sitemap mode.
    pub fn with_sitemap(mut self, is_sitemap: bool) -> Self {
        self.is_sitemap = is_sitemap;
        self
    }

    /// Sets the explicit page list for the synthetic root.
    pub fn with_pages(mut self, pages: impl IntoIterator<Item = PageId>) -> Self {
        self.pages = pages.into_iter().collect();
        self
    }

    /// Turns the legacy "guests only" filter on or off.
    pub fn with_honor_guests_only(mut self, honor: bool) -> Self {
        self.honor_guests_only = honor;
        self
    }
}
