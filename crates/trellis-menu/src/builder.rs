//! The front end menu builder.
//!
//! [`FrontendMenuBuilder::get_menu`] walks the page tree below a parent
//! page and returns a [`MenuItem`] tree:
//!
//! 1. the parent page is loaded and filtered (sitemap mode, guests-only,
//!    protection); filtered or missing pages produce no item
//! 2. its link is resolved by page type (redirect, root, forward, regular)
//! 3. every listable child is built recursively; children that produce no
//!    item are skipped
//! 4. depth limits, active/trail state, CSS classes, link attributes and
//!    extras are applied
//! 5. registered listeners receive a [`MenuEvent`] for the finished subtree
//!
//! Parent id 0 builds a synthetic `root` item whose children are either the
//! explicit page list of the [`BuildOptions`] or the (unlisted) children of
//! page 0.
//!
//! Nothing in here returns an error: repository failures and URL generation
//! failures are logged and the affected pages are omitted.

use crate::css::css_class;
use crate::event::{MenuEvent, MenuEventDispatcher, MenuListener};
use crate::factory::{DefaultMenuFactory, MenuFactory};
use crate::item::MenuItem;
use crate::options::BuildOptions;
use serde_json::Value;
use trellis_core::strings::{encode_email, single_line, specialchars};
use trellis_core::{
    ChildPage, ChildQuery, Error, INDEX_ALIAS, Page, PageId, PageRepository, PageType,
    PermissionChecker, ROLE_MEMBER, RequestContext, SitemapMode, UrlGenerator,
};

/// Extra holding whether the item is the active page.
pub const EXTRA_IS_ACTIVE: &str = "is_active";
/// Extra holding whether the item is on the active trail.
pub const EXTRA_IS_TRAIL: &str = "is_trail";
/// Extra holding the CSS class string.
pub const EXTRA_CLASS: &str = "class";

/// Builds navigation menus for one request.
///
/// The builder borrows its collaborators, so it is cheap to create per
/// request. Wrap the repository in a
/// [`CachedPageRepository`](trellis_core::CachedPageRepository) to serve the
/// per-page lookups of the recursion from the child listings.
pub struct FrontendMenuBuilder<'a> {
    repository: &'a dyn PageRepository,
    permissions: &'a dyn PermissionChecker,
    urls: &'a dyn UrlGenerator,
    context: &'a RequestContext,
    factory: Box<dyn MenuFactory + 'a>,
    dispatcher: MenuEventDispatcher,
}

impl<'a> FrontendMenuBuilder<'a> {
    /// Creates a builder with the default item factory and no listeners.
    pub fn new(
        repository: &'a dyn PageRepository,
        permissions: &'a dyn PermissionChecker,
        urls: &'a dyn UrlGenerator,
        context: &'a RequestContext,
    ) -> Self {
        Self {
            repository,
            permissions,
            urls,
            context,
            factory: Box::new(DefaultMenuFactory),
            dispatcher: MenuEventDispatcher::new(),
        }
    }

    /// Replaces the item factory.
    pub fn with_factory(mut self, factory: impl MenuFactory + 'a) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// Replaces the event dispatcher.
    pub fn with_dispatcher(mut self, dispatcher: MenuEventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Registers one more listener.
    pub fn with_listener(mut self, listener: impl MenuListener + 'static) -> Self {
        self.dispatcher = self.dispatcher.add(listener);
        self
    }

    /// The request this builder works for.
    pub fn context(&self) -> &RequestContext {
        self.context
    }

    /// Builds the menu below `pid`.
    ///
    /// Returns `None` if `pid` does not resolve to a page, or if that page
    /// is filtered out or has no usable link. `pid` 0 always yields the
    /// synthetic root item. At most one item of the tree is `current`.
    pub fn get_menu(&self, pid: PageId, options: &BuildOptions) -> Option<MenuItem> {
        let mut menu = self.build(pid, options, 0, true)?;
        keep_first_current(&mut menu, &mut false);
        Some(menu)
    }

    /// Builds the item for `pid`. Children are only looked up if `expand`.
    fn build(
        &self,
        pid: PageId,
        options: &BuildOptions,
        depth: u32,
        expand: bool,
    ) -> Option<MenuItem> {
        let page = if pid.is_none() { None } else { self.find_page(pid) };

        let mut item = match &page {
            Some(page) => self.get_item(page, options)?,
            None if pid.is_none() => self.factory.create_item("root"),
            None => return None,
        };

        if expand {
            for child in self.get_pages(pid, options) {
                let expand = child.has_subpages;
                if let Some(child) = self.build(child.page.id, options, depth + 1, expand) {
                    item.add_child(child);
                }
            }
        }

        item.display_children = options.show_level == 0
            || options.show_level > depth
            || (!options.hard_limit && self.context.active_trail_contains(pid));

        if let Some(page) = &page {
            self.populate(&mut item, page, options);
        }

        let mut event = MenuEvent::new(self.factory.as_ref(), &mut item, pid, options);
        self.dispatcher.dispatch(&mut event);

        Some(item)
    }

    // ------------------------------------------------------------------------
    // Filtering and links
    // ------------------------------------------------------------------------

    /// Applies the visibility rules to `page` and creates its linked item.
    fn get_item(&self, page: &Page, options: &BuildOptions) -> Option<MenuItem> {
        if options.is_sitemap && page.sitemap == SitemapMode::Never {
            return None;
        }

        if page.tabindex > 0 {
            log::warn!(
                "Page ID {}: tabindex values greater than 0 are deprecated",
                page.id
            );
        }

        if options.honor_guests_only
            && page.guests
            && !page.protected
            && self.permissions.is_granted(ROLE_MEMBER)
        {
            log::warn!(
                "Page ID {}: \"show to guests only\" is deprecated, protect the page instead",
                page.id
            );
            return None;
        }

        if page.protected
            && !options.show_protected
            && !(options.is_sitemap && page.sitemap == SitemapMode::Always)
            && !self.permissions.is_granted_groups(&page.groups)
        {
            log::debug!("Page ID {} is protected, skipping", page.id);
            return None;
        }

        let mut item = self.factory.create_item(&page.title);
        let uri = self.generate_uri(page, &mut item)?;
        item.uri = Some(uri);

        Some(item)
    }

    fn generate_uri(&self, page: &Page, item: &mut MenuItem) -> Option<String> {
        match page.page_type {
            PageType::Redirect => {
                if is_mailto(&page.url) {
                    Some(encode_email(&page.url))
                } else {
                    Some(page.url.clone())
                }
            }
            PageType::Root => {
                // Website roots link to their start page.
                let mut start = page.clone();
                start.alias = INDEX_ALIAS.to_string();
                self.frontend_url(&start)
            }
            PageType::Forward => {
                let target = self.forward_target(page);
                let visible = target.as_ref().is_some_and(|target| {
                    self.context.is_preview() || target.is_public_at(self.context.now())
                });

                if !visible {
                    item.display = false;
                }

                self.frontend_url(target.as_ref().unwrap_or(page))
            }
            _ => self.frontend_url(page),
        }
    }

    fn forward_target(&self, page: &Page) -> Option<Page> {
        let result = if page.jump_to.is_none() {
            self.repository
                .find_first_published_regular_by_pid(page.id, &self.context.publish_filter())
        } else {
            self.repository.find_with_details(page.jump_to)
        };

        match result {
            Ok(target) => target,
            Err(err) => {
                log::error!("Unable to load forward target of page ID {}: {err}", page.id);
                None
            }
        }
    }

    fn frontend_url(&self, page: &Page) -> Option<String> {
        match self.urls.frontend_url(page) {
            Ok(url) => Some(url),
            Err(err @ Error::Routing { .. }) => {
                log::error!("{err}");
                None
            }
            Err(err) => {
                log::error!("Unable to generate URL for page ID {}: {err}", page.id);
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // Population
    // ------------------------------------------------------------------------

    /// Sets active state, extras and link attributes.
    fn populate(&self, item: &mut MenuItem, page: &Page, options: &BuildOptions) {
        let active = self.context.active_page();
        let path = self.context.relative_path();

        let is_active = active.is_some_and(|active| {
            item.uri.as_deref() == Some(path)
                && !options.is_sitemap
                && (active.id == page.id
                    || (page.page_type == PageType::Forward && active.id == page.jump_to))
        });
        let is_trail = active.is_some_and(|active| active.trail_contains(page.id));
        let has_submenu = item.has_children() && item.display_children;

        // A forward page pointing at the active page is styled as active,
        // but only the active page itself is the current item.
        item.current = is_active && active.is_some_and(|active| active.id == page.id);

        match serde_json::to_value(page) {
            Ok(Value::Object(fields)) => item.extras.extend(fields),
            Ok(_) => {}
            Err(err) => log::warn!("Unable to expose fields of page ID {}: {err}", page.id),
        }

        if is_mailto(&page.url) {
            item.set_extra("url", encode_email(&page.url));
        }

        item.set_extra(EXTRA_IS_ACTIVE, is_active)
            .set_extra(EXTRA_IS_TRAIL, !is_active && is_trail)
            .set_extra(
                EXTRA_CLASS,
                css_class(page, active, is_active, is_trail, has_submenu),
            )
            .set_extra("title", specialchars(&page.title))
            .set_extra("page_title", specialchars(&page.page_title))
            .set_extra("description", single_line(&page.description));

        let mut rel = Vec::new();

        if page.robots.starts_with("noindex,nofollow") {
            rel.push("nofollow");
        }

        if page.page_type == PageType::Redirect && page.target {
            rel.push("noreferrer");
            rel.push("noopener");
            item.set_link_attribute("target", "_blank");
        }

        if !rel.is_empty() {
            item.set_link_attribute("rel", rel.join(" "));
        }

        let title = if page.page_title.is_empty() {
            &page.title
        } else {
            &page.page_title
        };
        if !title.is_empty() {
            item.set_link_attribute("title", title.as_str());
        }

        if !page.accesskey.is_empty() {
            item.set_link_attribute("accesskey", page.accesskey.as_str());
        }

        if page.tabindex != 0 {
            item.set_link_attribute("tabindex", page.tabindex.to_string());
        }
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    fn find_page(&self, id: PageId) -> Option<Page> {
        match self.repository.find_with_details(id) {
            Ok(page) => page,
            Err(err) => {
                log::error!("Unable to load page ID {id}: {err}");
                None
            }
        }
    }

    fn get_pages(&self, pid: PageId, options: &BuildOptions) -> Vec<ChildPage> {
        let filter = self.context.publish_filter();

        let result = if pid.is_none() && !options.pages.is_empty() {
            self.repository
                .find_published_regular_by_ids(&options.pages, &filter)
                .map(|pages| {
                    pages
                        .into_iter()
                        // Not known for listed pages; the recursion looks.
                        .map(|page| ChildPage {
                            page,
                            has_subpages: true,
                        })
                        .collect()
                })
        } else {
            let query = ChildQuery {
                show_hidden: options.show_hidden,
                is_sitemap: options.is_sitemap,
                filter,
            };
            self.repository.find_children(pid, &query)
        };

        match result {
            Ok(pages) => pages,
            Err(err) => {
                log::error!("Unable to load child pages of page ID {pid}: {err}");
                Vec::new()
            }
        }
    }
}

/// Clears `current` on every item after the first one in depth-first order.
///
/// An explicit page list may name a page and one of its ancestors, which
/// puts the same page into the tree twice.
fn keep_first_current(item: &mut MenuItem, seen: &mut bool) {
    if item.current {
        if *seen {
            item.current = false;
        } else {
            *seen = true;
        }
    }

    for child in &mut item.children {
        keep_first_current(child, seen);
    }
}

fn is_mailto(url: &str) -> bool {
    url.get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
}

// ============================================================================
// Tests
// ============================================================================
