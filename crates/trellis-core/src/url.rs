//! Front end URL generation.

use crate::error::{Error, Result};
use crate::page::Page;

/// Alias that stands for "the start page of a website".
pub const INDEX_ALIAS: &str = "index";

/// Generates canonical front end URLs for pages.
///
/// URLs are relative to the site base (no leading slash), which is also
/// how request paths are compared when marking active menu items.
pub trait UrlGenerator {
    /// Returns the URL of `page`, or an error if the page is not routable.
    fn frontend_url(&self, page: &Page) -> Result<String>;
}

/// Builds URLs from page aliases: `{language/}{alias}{suffix}`.
///
/// The alias [`INDEX_ALIAS`] maps to the empty URL (or the bare language
/// prefix), so website roots link to their start page.
#[derive(Clone, Debug)]
pub struct AliasUrlGenerator {
    suffix: String,
    prepend_locale: bool,
}

impl AliasUrlGenerator {
    /// Creates a generator appending `suffix` to every alias.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            prepend_locale: false,
        }
    }

    /// Prefixes URLs with the website language (`en/about.html`).
    pub fn with_prepend_locale(mut self, prepend_locale: bool) -> Self {
        self.prepend_locale = prepend_locale;
        self
    }

    fn prefix(&self, page: &Page) -> Result<String> {
        if !self.prepend_locale {
            return Ok(String::new());
        }

        match page.root_language() {
            "" => Err(Error::routing(page.id, "no language for locale prefix")),
            language => Ok(format!("{language}/")),
        }
    }
}

impl Default for AliasUrlGenerator {
    fn default() -> Self {
        Self::new(".html")
    }
}

impl UrlGenerator for AliasUrlGenerator {
    fn frontend_url(&self, page: &Page) -> Result<String> {
        if !page.page_type.is_routable() {
            return Err(Error::routing(
                page.id,
                format!("pages of type {} are not routable", page.page_type),
            ));
        }

        let prefix = self.prefix(page)?;
        let alias = page.alias.trim_matches('/');

        match alias {
            "" => Err(Error::routing(page.id, "page has no alias")),
            INDEX_ALIAS => Ok(prefix),
            alias => Ok(format!("{prefix}{alias}{}", self.suffix)),
        }
    }
}
