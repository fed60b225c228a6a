//! Request-scoped state shared by menu builders and repositories.

use crate::page::{Page, PageId};
use crate::repository::PublishFilter;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// Everything a builder needs to know about the current request.
///
/// The context is created once per request and passed explicitly; nothing
/// reads the active page from global state.
#[derive(Clone, Debug)]
pub struct RequestContext {
    path: String,
    active_page: Option<Page>,
    preview: bool,
    now: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for the given request path.
    ///
    /// The reference time is the current time floored to the minute, so
    /// that publication checks within one request agree with each other.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            active_page: None,
            preview: false,
            now: floor_to_minute(Utc::now()),
        }
    }

    /// Sets the page being rendered. Load it with details so its trail is known.
    pub fn with_active_page(mut self, page: Page) -> Self {
        self.active_page = Some(page);
        self
    }

    /// Enables preview mode (an authenticated back end user is previewing).
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Overrides the reference time (floored to the minute).
    pub fn with_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = floor_to_minute(now);
        self
    }

    /// The raw request path as given.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The request path without query string and leading slash.
    ///
    /// Menu item URIs are relative, so this is what they are compared with.
    pub fn relative_path(&self) -> &str {
        let path = self.path.split(['?', '#']).next().unwrap_or_default();
        path.trim_start_matches('/')
    }

    /// The page being rendered, if any.
    pub fn active_page(&self) -> Option<&Page> {
        self.active_page.as_ref()
    }

    /// Whether preview mode is on.
    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Reference time for publication checks.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Whether `id` is the active page or one of its ancestors.
    pub fn active_trail_contains(&self, id: PageId) -> bool {
        self.active_page
            .as_ref()
            .is_some_and(|page| page.trail_contains(id))
    }

    /// Publication filter for repository queries made on behalf of this request.
    pub fn publish_filter(&self) -> PublishFilter {
        PublishFilter {
            now: self.now,
            preview: self.preview,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new("")
    }
}

/// Truncates a timestamp to the start of its minute.
pub fn floor_to_minute(time: DateTime<Utc>) -> DateTime<Utc> {
    time.duration_trunc(TimeDelta::minutes(1)).unwrap_or(time)
}
