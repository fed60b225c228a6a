//! Common test utilities and harness for Trellis menu integration tests.

use chrono::{DateTime, TimeZone, Utc};
use trellis_core::{
    AliasUrlGenerator, CachedPageRepository, MemoryPageRepository, PageId, PageRepository,
    RequestContext, Visitor,
};
use trellis_menu::{BuildOptions, FrontendMenuBuilder, MenuItem};

/// The example website.
///
/// ```text
/// 1  Example (root)
/// ├── 2  Home
/// ├── 3  About
/// │   ├── 4  Team
/// │   │   └── 5  Lead
/// │   ├── 17 Partners (hidden)
/// │   ├── 16 History
/// │   └── 6  Jobs
/// ├── 7  Hidden (hidden)
/// ├── 8  Members (protected, group 1)
/// │   └── 9  Board
/// ├── 10 Contact (redirect to mailto:)
/// ├── 11 Shortcut (forward to 12)
/// ├── 12 Draft (unpublished)
/// ├── 13 News (forward to first child)
/// │   └── 14 Latest
/// ├── 15 Scheduled (starts 2030)
/// └── 18 Company (forward to 3)
/// ```
pub const SITE: &str = r#"
[[page]]
id = 1
type = "root"
title = "Example"
alias = "index"
language = "en"

[[page]]
id = 2
pid = 1
sorting = 10
title = "Home"
alias = "home"

[[page]]
id = 3
pid = 1
sorting = 20
title = "About"
alias = "about"

[[page]]
id = 4
pid = 3
sorting = 10
title = "Team"
alias = "team"

[[page]]
id = 5
pid = 4
title = "Lead"
alias = "lead"

[[page]]
id = 17
pid = 3
sorting = 15
title = "Partners"
alias = "partners"
hide = true

[[page]]
id = 16
pid = 3
sorting = 20
title = "History"
alias = "history"

[[page]]
id = 6
pid = 3
sorting = 30
title = "Jobs"
alias = "jobs"

[[page]]
id = 7
pid = 1
sorting = 25
title = "Hidden"
alias = "hidden"
hide = true

[[page]]
id = 8
pid = 1
sorting = 30
title = "Members"
alias = "members"
protected = true
groups = [1]

[[page]]
id = 9
pid = 8
title = "Board"
alias = "board"

[[page]]
id = 10
pid = 1
sorting = 40
type = "redirect"
title = "Contact"
url = "mailto:info@example.com"

[[page]]
id = 11
pid = 1
sorting = 50
type = "forward"
title = "Shortcut"
alias = "shortcut"
jump_to = 12

[[page]]
id = 12
pid = 1
sorting = 60
title = "Draft"
alias = "draft"
published = false

[[page]]
id = 13
pid = 1
sorting = 70
type = "forward"
title = "News"
alias = "news"

[[page]]
id = 14
pid = 13
title = "Latest"
alias = "latest"

[[page]]
id = 15
pid = 1
sorting = 80
title = "Scheduled"
alias = "scheduled"
start = "2030-01-01T00:00:00Z"

[[page]]
id = 18
pid = 1
sorting = 90
type = "forward"
title = "Company"
alias = "company"
jump_to = 3
"#;

/// Reference time of every request in the suite.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

/// Test harness for integration tests.
///
/// Holds the page table and the collaborators a builder borrows.
pub struct TestSite {
    /// Request-scoped cache over the example website.
    pub repository: CachedPageRepository<MemoryPageRepository>,
    /// URL generator (`alias.html`).
    pub urls: AliasUrlGenerator,
    /// Request context.
    pub context: RequestContext,
    /// Current visitor.
    pub visitor: Visitor,
}

impl TestSite {
    /// A guest visiting the start page.
    pub fn new() -> Self {
        let pages = MemoryPageRepository::from_toml_str(SITE).expect("fixture parses");
        Self {
            repository: CachedPageRepository::new(pages),
            urls: AliasUrlGenerator::default(),
            context: RequestContext::new("/").with_time(now()),
            visitor: Visitor::Guest,
        }
    }

    /// Visits `path` with `active` as the rendered page.
    pub fn visiting(mut self, path: &str, active: u32) -> Self {
        let page = self
            .repository
            .find_with_details(PageId::new(active))
            .unwrap()
            .expect("active page exists");
        self.context = RequestContext::new(path)
            .with_time(now())
            .with_active_page(page)
            .with_preview(self.context.is_preview());
        self
    }

    /// Logs the visitor in as a member of `groups`.
    pub fn as_member(mut self, groups: Vec<i32>) -> Self {
        self.visitor = Visitor::member(groups);
        self
    }

    /// Turns preview mode on.
    pub fn in_preview(mut self) -> Self {
        self.context = self.context.with_preview(true);
        self
    }

    /// Creates a builder over this site.
    pub fn builder(&self) -> FrontendMenuBuilder<'_> {
        FrontendMenuBuilder::new(&self.repository, &self.visitor, &self.urls, &self.context)
    }

    /// Builds the menu below `pid`.
    pub fn menu(&self, pid: u32, options: &BuildOptions) -> Option<MenuItem> {
        self.builder().get_menu(PageId::new(pid), options)
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of the direct children of `item`.
pub fn child_names(item: &MenuItem) -> Vec<&str> {
    item.children.iter().map(|child| child.name.as_str()).collect()
}

/// Finds an item by name anywhere in the tree.
pub fn find<'a>(item: &'a MenuItem, name: &str) -> Option<&'a MenuItem> {
    item.find(|candidate| candidate.name == name)
}
