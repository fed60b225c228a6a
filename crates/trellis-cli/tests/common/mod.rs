//! Common test utilities for trellis CLI integration tests.

use std::path::PathBuf;
use tempfile::TempDir;
use trellis_cli::TrellisConfig;

/// A small website.
///
/// ```text
/// 1 Example (root)
/// ├── 2 Home
/// ├── 3 About
/// │   └── 4 Team
/// ├── 5 Archive (hidden)
/// └── 6 Members (protected, group 1)
/// ```
pub const PAGES: &str = r#"
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
title = "Team"
alias = "team"

[[page]]
id = 5
pid = 1
sorting = 30
title = "Archive"
alias = "archive"
hide = true

[[page]]
id = 6
pid = 1
sorting = 40
title = "Members"
alias = "members"
protected = true
groups = [1]
"#;

/// A temporary directory holding the page table.
pub struct TestSite {
    _dir: TempDir,
    /// Path of the page table.
    pub pages_file: PathBuf,
    /// Configuration pointing at the page table.
    pub config: TrellisConfig,
}

impl TestSite {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let pages_file = dir.path().join("pages.toml");
        std::fs::write(&pages_file, PAGES).expect("write page table");

        let mut config = TrellisConfig::default();
        config.site.pages_file = pages_file.clone();

        Self {
            _dir: dir,
            pages_file,
            config,
        }
    }
}

/// Names of the direct children of a JSON menu item.
pub fn json_child_names(item: &serde_json::Value) -> Vec<String> {
    item["children"]
        .as_array()
        .map(|children| {
            children
                .iter()
                .filter_map(|child| child["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
