//! Request-scoped read-through page cache.

use super::{ChildPage, ChildQuery, PageRepository, PublishFilter};
use crate::error::Result;
use crate::page::{Page, PageId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Read-through cache in front of another repository.
///
/// Child listings and id lookups prime the cache in one batch, so that the
/// per-page lookups a menu builder makes while recursing are served from
/// memory. Misses (including "not found") are cached too.
///
/// The cache lives for one request. It is never invalidated and uses
/// interior mutability without locking, so it is neither `Sync` nor meant
/// to be shared between requests.
pub struct CachedPageRepository<R> {
    inner: R,
    pages: RefCell<HashMap<PageId, Option<Page>>>,
    backend_lookups: Cell<usize>,
}

impl<R: PageRepository> CachedPageRepository<R> {
    /// Wraps a repository.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pages: RefCell::new(HashMap::new()),
            backend_lookups: Cell::new(0),
        }
    }

    /// Loads `ids` into the cache with a single bulk lookup.
    pub fn prefetch(&self, ids: &[PageId]) -> Result<()> {
        let missing: Vec<PageId> = {
            let pages = self.pages.borrow();
            ids.iter().copied().filter(|id| !pages.contains_key(id)).collect()
        };
        if missing.is_empty() {
            return Ok(());
        }

        self.count_lookup();
        let found = self.inner.find_multiple_by_ids(&missing)?;

        let mut pages = self.pages.borrow_mut();
        for id in missing {
            pages.insert(id, None);
        }
        for page in found {
            pages.insert(page.id, Some(page));
        }
        Ok(())
    }

    /// Number of calls forwarded to the wrapped repository so far.
    pub fn backend_lookups(&self) -> usize {
        self.backend_lookups.get()
    }

    /// Number of cached entries (including cached misses).
    pub fn cached_len(&self) -> usize {
        self.pages.borrow().len()
    }

    /// Returns the wrapped repository.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn count_lookup(&self) {
        self.backend_lookups.set(self.backend_lookups.get() + 1);
    }

    fn prime<'p>(&self, pages: impl IntoIterator<Item = &'p Page>) {
        let mut cache = self.pages.borrow_mut();
        for page in pages {
            cache.entry(page.id).or_insert_with(|| Some(page.clone()));
        }
    }
}

impl<R: PageRepository> PageRepository for CachedPageRepository<R> {
    fn find_with_details(&self, id: PageId) -> Result<Option<Page>> {
        if let Some(cached) = self.pages.borrow().get(&id) {
            return Ok(cached.clone());
        }

        self.count_lookup();
        let page = self.inner.find_with_details(id)?;
        self.pages.borrow_mut().insert(id, page.clone());
        Ok(page)
    }

    fn find_children(&self, pid: PageId, query: &ChildQuery) -> Result<Vec<ChildPage>> {
        self.count_lookup();
        let children = self.inner.find_children(pid, query)?;
        self.prime(children.iter().map(|child| &child.page));
        Ok(children)
    }

    fn find_published_regular_by_ids(
        &self,
        ids: &[PageId],
        filter: &PublishFilter,
    ) -> Result<Vec<Page>> {
        self.count_lookup();
        let pages = self.inner.find_published_regular_by_ids(ids, filter)?;
        self.prime(&pages);
        Ok(pages)
    }

    fn find_first_published_regular_by_pid(
        &self,
        pid: PageId,
        filter: &PublishFilter,
    ) -> Result<Option<Page>> {
        self.count_lookup();
        let page = self.inner.find_first_published_regular_by_pid(pid, filter)?;
        self.prime(page.iter());
        Ok(page)
    }

    fn find_multiple_by_ids(&self, ids: &[PageId]) -> Result<Vec<Page>> {
        self.prefetch(ids)?;
        let pages = self.pages.borrow();
        Ok(ids
            .iter()
            .filter_map(|id| pages.get(id).cloned().flatten())
            .collect())
    }
}
