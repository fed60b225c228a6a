//! Sitemaps: the whole page tree of a website, ignoring depth limits.

use crate::builder::FrontendMenuBuilder;
use crate::item::MenuItem;
use crate::options::BuildOptions;
use trellis_core::{Page, PageId};

/// Builds sitemaps with a [`FrontendMenuBuilder`].
///
/// Sitemap mode differs from a navigation menu in a few ways: every level
/// is displayed, nothing is marked active, hidden or protected pages with
/// `sitemap = always` are listed, and pages with `sitemap = never` are not.
pub struct Sitemap<'b, 'a> {
    builder: &'b FrontendMenuBuilder<'a>,
    options: BuildOptions,
}

impl<'b, 'a> Sitemap<'b, 'a> {
    /// Creates a sitemap over the builder's request.
    pub fn new(builder: &'b FrontendMenuBuilder<'a>) -> Self {
        Self {
            builder,
            options: sitemap_options(BuildOptions::default()),
        }
    }

    /// Uses `options` as the base (e.g. to include hidden pages).
    ///
    /// Depth limits and the sitemap flag are always overridden.
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = sitemap_options(options);
        self
    }

    /// The effective build options.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// The page a sitemap starts from.
    ///
    /// Falls back to the website root of the active page, then to the
    /// synthetic root.
    pub fn resolve_root(&self, root: Option<PageId>) -> PageId {
        root.or_else(|| {
            self.builder
                .context()
                .active_page()
                .and_then(Page::root_id)
        })
        .unwrap_or(PageId::NONE)
    }

    /// Builds the sitemap below `root` (see [`Sitemap::resolve_root`]).
    pub fn build(&self, root: Option<PageId>) -> Option<MenuItem> {
        let root = self.resolve_root(root);
        log::debug!("Building sitemap from page ID {root}");
        self.builder.get_menu(root, &self.options)
    }
}

fn sitemap_options(options: BuildOptions) -> BuildOptions {
    options
        .with_show_level(0)
        .with_hard_limit(false)
        .with_sitemap(true)
}
