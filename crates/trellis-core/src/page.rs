//! Page records and their computed details.
//!
//! A [`Page`] mirrors one row of the page table. Pages form a tree through
//! their `pid` (parent id); the top level of every website is a page of type
//! [`PageType::Root`] whose `pid` is [`PageId::NONE`].
//!
//! Repositories attach [`PageDetails`] when a page is loaded "with details":
//! the trail of ancestor ids, the website root, and the protection settings
//! inherited from the nearest protected ancestor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a member group.
///
/// The pseudo group [`GUESTS_GROUP`] stands for "visitors who are not
/// logged in".
pub type GroupId = i32;

/// Pseudo group id that grants access to anonymous visitors.
pub const GUESTS_GROUP: GroupId = -1;

// ============================================================================
// PageId
// ============================================================================

/// Identifier of a page row.
///
/// The value `0` ([`PageId::NONE`]) means "no page": it is the parent of
/// website roots, an unset forward target, and the synthetic menu root.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PageId(u32);

impl PageId {
    /// The "no page" id.
    pub const NONE: PageId = PageId(0);

    /// Creates a page id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns `true` for [`PageId::NONE`].
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PageId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for PageId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

// ============================================================================
// PageType
// ============================================================================

/// Type of a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    /// A regular content page.
    #[default]
    Regular,
    /// The start point of a website (one per domain/language).
    Root,
    /// Internally forwards to another page.
    Forward,
    /// Redirects to an external URL.
    Redirect,
    /// Error page for 401 Unauthorized.
    #[serde(rename = "error_401")]
    Error401,
    /// Error page for 403 Forbidden.
    #[serde(rename = "error_403")]
    Error403,
    /// Error page for 404 Not Found.
    #[serde(rename = "error_404")]
    Error404,
    /// Error page for 503 Service Unavailable.
    #[serde(rename = "error_503")]
    Error503,
}

impl PageType {
    /// Whether pages of this type can be reached through a URL of their own.
    ///
    /// Error pages are only rendered in place of other responses.
    pub fn is_routable(self) -> bool {
        !matches!(
            self,
            Self::Error401 | Self::Error403 | Self::Error404 | Self::Error503
        )
    }

    /// Returns the type name as stored in the page table.
    pub fn name(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Root => "root",
            Self::Forward => "forward",
            Self::Redirect => "redirect",
            Self::Error401 => "error_401",
            Self::Error403 => "error_403",
            Self::Error404 => "error_404",
            Self::Error503 => "error_503",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SitemapMode
// ============================================================================

/// How a page takes part in the sitemap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SitemapMode {
    /// Follow the regular visibility rules.
    #[default]
    #[serde(alias = "map_default")]
    Default,
    /// Always list the page, even if it is hidden or protected.
    #[serde(alias = "map_always")]
    Always,
    /// Never list the page.
    #[serde(alias = "map_never")]
    Never,
}

// ============================================================================
// Page
// ============================================================================

/// One page of the site tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Page id.
    pub id: PageId,
    /// Parent page id ([`PageId::NONE`] for website roots).
    pub pid: PageId,
    /// Sort key among siblings.
    pub sorting: u32,
    /// Page type.
    #[serde(rename = "type")]
    pub page_type: PageType,
    /// Navigation title.
    pub title: String,
    /// URL alias.
    pub alias: String,
    /// Title used in the document head; falls back to `title`.
    pub page_title: String,
    /// Meta description.
    pub description: String,
    /// Redirect target (redirect pages only).
    pub url: String,
    /// Open redirect targets in a new window.
    pub target: bool,
    /// Forward target ([`PageId::NONE`] means "first published child").
    pub jump_to: PageId,
    /// Hide the page in navigation menus.
    pub hide: bool,
    /// Restrict the page to member groups.
    pub protected: bool,
    /// Member groups allowed to see a protected page.
    pub groups: Vec<GroupId>,
    /// Legacy "show to guests only" flag.
    pub guests: bool,
    /// Whether the page is published at all.
    pub published: bool,
    /// Publication start (inclusive).
    pub start: Option<DateTime<Utc>>,
    /// Publication stop (exclusive).
    pub stop: Option<DateTime<Utc>>,
    /// Sitemap participation.
    pub sitemap: SitemapMode,
    /// Custom CSS class for menu items.
    pub css_class: String,
    /// Robots meta tag value.
    pub robots: String,
    /// Keyboard access key.
    pub accesskey: String,
    /// Tab index (values above 0 are deprecated).
    pub tabindex: i32,
    /// Language of a website root.
    pub language: String,
    /// Computed details; only set by repositories.
    #[serde(skip)]
    pub details: Option<PageDetails>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            id: PageId::NONE,
            pid: PageId::NONE,
            sorting: 0,
            page_type: PageType::Regular,
            title: String::new(),
            alias: String::new(),
            page_title: String::new(),
            description: String::new(),
            url: String::new(),
            target: false,
            jump_to: PageId::NONE,
            hide: false,
            protected: false,
            groups: Vec::new(),
            guests: false,
            published: true,
            start: None,
            stop: None,
            sitemap: SitemapMode::Default,
            css_class: String::new(),
            robots: String::new(),
            accesskey: String::new(),
            tabindex: 0,
            language: String::new(),
            details: None,
        }
    }
}

impl Page {
    /// Creates a published regular page.
    pub fn new(id: u32, pid: u32, title: impl Into<String>) -> Self {
        Self {
            id: PageId::new(id),
            pid: PageId::new(pid),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Creates a website root page.
    pub fn root(id: u32, title: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            page_type: PageType::Root,
            language: language.into(),
            ..Self::new(id, 0, title)
        }
    }

    /// Sets the alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Sets the sort key.
    pub fn with_sorting(mut self, sorting: u32) -> Self {
        self.sorting = sorting;
        self
    }

    /// Sets the page type.
    pub fn with_type(mut self, page_type: PageType) -> Self {
        self.page_type = page_type;
        self
    }

    /// Turns the page into a forward page.
    pub fn forwarding_to(mut self, jump_to: u32) -> Self {
        self.page_type = PageType::Forward;
        self.jump_to = PageId::new(jump_to);
        self
    }

    /// Turns the page into a redirect page.
    pub fn redirecting_to(mut self, url: impl Into<String>) -> Self {
        self.page_type = PageType::Redirect;
        self.url = url.into();
        self
    }

    /// Hides the page in navigation menus.
    pub fn hidden(mut self) -> Self {
        self.hide = true;
        self
    }

    /// Protects the page for the given member groups.
    pub fn protected_for(mut self, groups: impl Into<Vec<GroupId>>) -> Self {
        self.protected = true;
        self.groups = groups.into();
        self
    }

    /// Marks the page as unpublished.
    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }

    /// Sets the sitemap mode.
    pub fn with_sitemap(mut self, sitemap: SitemapMode) -> Self {
        self.sitemap = sitemap;
        self
    }

    /// Sets the custom CSS class.
    pub fn with_css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = css_class.into();
        self
    }

    /// Whether the page's own publication settings allow it at `now`.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.published
            && self.start.is_none_or(|start| start <= now)
            && self.stop.is_none_or(|stop| stop > now)
    }

    /// Whether the page is publicly visible at `now`.
    ///
    /// Unlike [`Page::is_published_at`] this also requires every ancestor to
    /// be published, which is only known once details are loaded.
    pub fn is_public_at(&self, now: DateTime<Utc>) -> bool {
        self.is_published_at(now)
            && self
                .details
                .as_ref()
                .is_none_or(|details| details.ancestors_published)
    }

    /// Ancestor ids from the website root down to this page.
    ///
    /// Empty when details are not loaded.
    pub fn trail(&self) -> &[PageId] {
        self.details
            .as_ref()
            .map(|details| details.trail.as_slice())
            .unwrap_or_default()
    }

    /// Whether `id` is this page or one of its ancestors.
    pub fn trail_contains(&self, id: PageId) -> bool {
        self.trail().contains(&id)
    }

    /// Id of the website root this page belongs to.
    pub fn root_id(&self) -> Option<PageId> {
        self.details.as_ref().map(|details| details.root_id)
    }

    /// Language of the website this page belongs to.
    pub fn root_language(&self) -> &str {
        self.details
            .as_ref()
            .map(|details| details.root_language.as_str())
            .filter(|language| !language.is_empty())
            .unwrap_or(&self.language)
    }
}

// ============================================================================
// PageDetails
// ============================================================================

/// Values computed from a page's ancestors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageDetails {
    /// Ancestor ids from the website root down to the page itself.
    pub trail: Vec<PageId>,
    /// The website root.
    pub root_id: PageId,
    /// Language of the website root.
    pub root_language: String,
    /// Whether every ancestor is published.
    pub ancestors_published: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_page_id_none() {
        assert!(PageId::NONE.is_none());
        assert!(!PageId::new(3).is_none());
        assert_eq!(PageId::default(), PageId::NONE);
    }

    #[test]
    fn test_page_id_parse_and_display() {
        let id: PageId = " 17 ".parse().unwrap();
        assert_eq!(id.get(), 17);
        assert_eq!(id.to_string(), "17");
        assert!("abc".parse::<PageId>().is_err());
    }

    #[test]
    fn test_page_type_routable() {
        assert!(PageType::Regular.is_routable());
        assert!(PageType::Forward.is_routable());
        assert!(PageType::Root.is_routable());
        assert!(!PageType::Error404.is_routable());
        assert!(!PageType::Error503.is_routable());
    }

    #[test]
    fn test_page_deserialize_from_toml() {
        let page: Page = toml::from_str(
            r#"
            id = 5
            pid = 1
            type = "forward"
            title = "Shortcut"
            jump_to = 9
            sitemap = "map_never"
            groups = [1, 2]
            start = "2026-01-01T00:00:00Z"
            "#,
        )
        .unwrap();

        assert_eq!(page.id, PageId::new(5));
        assert_eq!(page.page_type, PageType::Forward);
        assert_eq!(page.jump_to, PageId::new(9));
        assert_eq!(page.sitemap, SitemapMode::Never);
        assert_eq!(page.groups, vec![1, 2]);
        assert!(page.published, "published defaults to true");
        assert!(page.start.is_some());
        assert!(page.details.is_none());
    }

    #[test]
    fn test_error_page_type_names() {
        let page: Page = toml::from_str("id = 1\ntype = \"error_404\"").unwrap();
        assert_eq!(page.page_type, PageType::Error404);
        assert_eq!(page.page_type.to_string(), "error_404");
    }

    #[test]
    fn test_publication_window() {
        let mut page = Page::new(2, 1, "Timed");
        page.start = Some(at(8));
        page.stop = Some(at(18));

        assert!(!page.is_published_at(at(7)));
        assert!(page.is_published_at(at(8)));
        assert!(page.is_published_at(at(17)));
        assert!(!page.is_published_at(at(18)), "stop is exclusive");
    }

    #[test]
    fn test_unpublished_page_is_never_public() {
        let page = Page::new(2, 1, "Draft").unpublished();
        assert!(!page.is_published_at(at(12)));
        assert!(!page.is_public_at(at(12)));
    }

    #[test]
    fn test_public_requires_published_ancestors() {
        let mut page = Page::new(3, 2, "Child");
        page.details = Some(PageDetails {
            trail: vec![PageId::new(1), PageId::new(2), PageId::new(3)],
            root_id: PageId::new(1),
            root_language: "en".to_string(),
            ancestors_published: false,
        });

        assert!(page.is_published_at(at(12)));
        assert!(!page.is_public_at(at(12)));
    }

    #[test]
    fn test_trail_accessors() {
        let mut page = Page::new(3, 2, "Child");
        assert!(page.trail().is_empty());
        assert_eq!(page.root_id(), None);

        page.details = Some(PageDetails {
            trail: vec![PageId::new(1), PageId::new(2), PageId::new(3)],
            root_id: PageId::new(1),
            root_language: "de".to_string(),
            ancestors_published: true,
        });

        assert!(page.trail_contains(PageId::new(2)));
        assert!(!page.trail_contains(PageId::new(4)));
        assert_eq!(page.root_id(), Some(PageId::new(1)));
        assert_eq!(page.root_language(), "de");
    }

    #[test]
    fn test_builder_helpers() {
        let page = Page::new(4, 1, "Members")
            .with_alias("members")
            .with_sorting(40)
            .protected_for(vec![1, GUESTS_GROUP])
            .hidden();

        assert_eq!(page.alias, "members");
        assert_eq!(page.sorting, 40);
        assert!(page.protected);
        assert!(page.hide);
        assert_eq!(page.groups, vec![1, -1]);
    }
}
