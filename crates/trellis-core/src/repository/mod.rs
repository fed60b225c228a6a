//! Page lookup contracts and implementations.
//!
//! - [`PageRepository`]: the lookup trait menu builders depend on
//! - [`MemoryPageRepository`]: a page table held in memory (loadable from TOML)
//! - [`CachedPageRepository`]: request-scoped read-through cache over any repository

mod cache;
mod memory;

pub use cache::CachedPageRepository;
pub use memory::MemoryPageRepository;

use crate::error::Result;
use crate::page::{Page, PageId};
use chrono::{DateTime, Utc};

// ============================================================================
// Query types
// ============================================================================

/// Publication filtering applied to listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublishFilter {
    /// Reference time, floored to the minute.
    pub now: DateTime<Utc>,
    /// Preview mode: an authenticated back end user sees unpublished pages too.
    pub preview: bool,
}

impl PublishFilter {
    /// Whether `page` passes the filter.
    pub fn allows(&self, page: &Page) -> bool {
        self.preview || page.is_published_at(self.now)
    }
}

/// Parameters for listing the children of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildQuery {
    /// Include pages hidden from navigation.
    pub show_hidden: bool,
    /// Sitemap mode: hidden pages with `sitemap = always` are included.
    pub is_sitemap: bool,
    /// Publication filter.
    pub filter: PublishFilter,
}

impl ChildQuery {
    /// Whether `page` should be listed as a child.
    ///
    /// Website roots and unroutable pages are never listed.
    pub fn allows(&self, page: &Page) -> bool {
        use crate::page::{PageType, SitemapMode};

        if page.page_type == PageType::Root || !page.page_type.is_routable() {
            return false;
        }

        let visible = self.show_hidden
            || !page.hide
            || (self.is_sitemap && page.sitemap == SitemapMode::Always);

        visible && self.filter.allows(page)
    }
}

/// A child page together with whether it has listable children itself.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildPage {
    /// The child page, loaded with details.
    pub page: Page,
    /// Whether the child has children passing the same query.
    pub has_subpages: bool,
}

// ============================================================================
// PageRepository
// ============================================================================

/// Read access to the page table.
///
/// Lookups that find nothing return `Ok(None)` or an empty list; errors are
/// reserved for a broken backend or an inconsistent tree.
pub trait PageRepository {
    /// Loads a page with details, regardless of its publication state.
    fn find_with_details(&self, id: PageId) -> Result<Option<Page>>;

    /// Lists the children of `pid` passing `query`, ordered by sort key.
    fn find_children(&self, pid: PageId, query: &ChildQuery) -> Result<Vec<ChildPage>>;

    /// Loads published, routable pages by id, in the order of `ids`.
    ///
    /// Website roots are included. Unknown ids are skipped.
    fn find_published_regular_by_ids(
        &self,
        ids: &[PageId],
        filter: &PublishFilter,
    ) -> Result<Vec<Page>>;

    /// Returns the first published, routable child of `pid` by sort key.
    fn find_first_published_regular_by_pid(
        &self,
        pid: PageId,
        filter: &PublishFilter,
    ) -> Result<Option<Page>>;

    /// Loads several pages with details in one go.
    ///
    /// The default implementation performs one lookup per id.
    fn find_multiple_by_ids(&self, ids: &[PageId]) -> Result<Vec<Page>> {
        let mut pages = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(page) = self.find_with_details(*id)? {
                pages.push(page);
            }
        }
        Ok(pages)
    }
}
