//! In-memory page table.

use super::{ChildPage, ChildQuery, PageRepository, PublishFilter};
use crate::error::{Error, Result};
use crate::page::{Page, PageDetails, PageId, PageType};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// On-disk layout of a page table: a list of `[[page]]` tables.
#[derive(Deserialize)]
struct PageTable {
    #[serde(default, rename = "page")]
    pages: Vec<Page>,
}

/// A page table held in memory.
///
/// Children are indexed by parent id and kept in sort-key order, so listings
/// never sort at query time.
#[derive(Clone, Debug, Default)]
pub struct MemoryPageRepository {
    pages: BTreeMap<PageId, Page>,
    children: BTreeMap<PageId, Vec<PageId>>,
}

impl MemoryPageRepository {
    /// Builds a repository from page rows.
    ///
    /// Fails on duplicate ids and on rows using the reserved id `0`.
    pub fn from_pages(pages: impl IntoIterator<Item = Page>) -> Result<Self> {
        let mut repository = Self::default();

        for mut page in pages {
            if page.id.is_none() {
                return Err(Error::parse(format!(
                    "page '{}' uses the reserved id 0",
                    page.title
                )));
            }
            page.details = None;
            let id = page.id;
            if repository.pages.insert(id, page).is_some() {
                return Err(Error::parse(format!("duplicate page id {id}")));
            }
        }

        for page in repository.pages.values() {
            repository.children.entry(page.pid).or_default().push(page.id);
        }
        for ids in repository.children.values_mut() {
            ids.sort_by_key(|id| {
                let sorting = repository.pages.get(id).map_or(0, |page| page.sorting);
                (sorting, *id)
            });
        }

        log::debug!("Loaded page table with {} pages", repository.pages.len());
        Ok(repository)
    }

    /// Parses a TOML page table (`[[page]]` entries).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: PageTable = toml::from_str(content)
            .map_err(|e| Error::parse(format!("Failed to parse page table: {e}")))?;
        Self::from_pages(table.pages)
    }

    /// Loads a TOML page table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
    }

    /// Number of pages in the table.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn child_ids(&self, pid: PageId) -> &[PageId] {
        self.children.get(&pid).map(Vec::as_slice).unwrap_or_default()
    }

    /// Clones a page and computes its details from the ancestor chain.
    fn with_details(&self, page: &Page) -> Result<Page> {
        let mut ancestors = Vec::new();
        let mut visited = HashSet::from([page.id]);
        let mut pid = page.pid;

        while !pid.is_none() {
            if !visited.insert(pid) {
                return Err(Error::repository(format!(
                    "cycle in page tree above page {}",
                    page.id
                )));
            }
            let parent = self.pages.get(&pid).ok_or_else(|| {
                Error::repository(format!("page {} references missing parent {pid}", page.id))
            })?;
            ancestors.push(parent);
            pid = parent.pid;
        }

        let mut detailed = page.clone();

        // Protection is inherited from the nearest protected ancestor.
        if !detailed.protected
            && let Some(protector) = ancestors.iter().find(|ancestor| ancestor.protected)
        {
            detailed.protected = true;
            detailed.groups = protector.groups.clone();
        }

        let root = ancestors
            .iter()
            .rev()
            .find(|ancestor| ancestor.page_type == PageType::Root)
            .copied()
            .or_else(|| ancestors.last().copied())
            .unwrap_or(page);

        let mut trail: Vec<PageId> = ancestors.iter().rev().map(|ancestor| ancestor.id).collect();
        trail.push(page.id);

        detailed.details = Some(PageDetails {
            trail,
            root_id: root.id,
            root_language: root.language.clone(),
            ancestors_published: ancestors.iter().all(|ancestor| ancestor.published),
        });

        Ok(detailed)
    }
}

impl PageRepository for MemoryPageRepository {
    fn find_with_details(&self, id: PageId) -> Result<Option<Page>> {
        self.pages
            .get(&id)
            .map(|page| self.with_details(page))
            .transpose()
    }

    fn find_children(&self, pid: PageId, query: &ChildQuery) -> Result<Vec<ChildPage>> {
        let mut children = Vec::new();

        for id in self.child_ids(pid) {
            let Some(page) = self.pages.get(id) else {
                continue;
            };
            if !query.allows(page) {
                continue;
            }

            let has_subpages = self
                .child_ids(page.id)
                .iter()
                .filter_map(|child| self.pages.get(child))
                .any(|child| query.allows(child));

            children.push(ChildPage {
                page: self.with_details(page)?,
                has_subpages,
            });
        }

        Ok(children)
    }

    fn find_published_regular_by_ids(
        &self,
        ids: &[PageId],
        filter: &PublishFilter,
    ) -> Result<Vec<Page>> {
        ids.iter()
            .filter_map(|id| self.pages.get(id))
            .filter(|page| page.page_type.is_routable() && filter.allows(page))
            .map(|page| self.with_details(page))
            .collect()
    }

    fn find_first_published_regular_by_pid(
        &self,
        pid: PageId,
        filter: &PublishFilter,
    ) -> Result<Option<Page>> {
        self.child_ids(pid)
            .iter()
            .filter_map(|id| self.pages.get(id))
            .find(|page| {
                page.page_type != PageType::Root
                    && page.page_type.is_routable()
                    && filter.allows(page)
            })
            .map(|page| self.with_details(page))
            .transpose()
    }

    fn find_multiple_by_ids(&self, ids: &[PageId]) -> Result<Vec<Page>> {
        ids.iter()
            .filter_map(|id| self.pages.get(id))
            .map(|page| self.with_details(page))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
