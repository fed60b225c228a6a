//! Implementations of the `trellis` commands.
//!
//! Rendering functions return the output as a string; [`run`] prints it.

use crate::cli::{Cli, Command, CspAction, MenuArgs, OutputFormat, RequestArgs, SitemapArgs};
use crate::config::TrellisConfig;
use crate::config_handlers::handle_config_command;
use anyhow::{Context, Result, bail};
use std::path::Path;
use trellis_core::{
    AliasUrlGenerator, CachedPageRepository, MemoryPageRepository, PageId, PageRepository,
    RequestContext, UrlGenerator, Visitor,
};
use trellis_menu::{BuildOptions, FrontendMenuBuilder, MenuItem, Sitemap, render_outline};

/// Runs a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        pages_file,
        command,
    } = cli;

    match command {
        Command::Menu(args) => {
            let config = TrellisConfig::load(config.as_deref())?;
            print!("{}", render_menu(&config, pages_file.as_deref(), &args)?);
        }
        Command::Sitemap(args) => {
            let config = TrellisConfig::load(config.as_deref())?;
            print!("{}", render_sitemap(&config, pages_file.as_deref(), &args)?);
        }
        Command::Csp { action } => {
            let config = TrellisConfig::load(config.as_deref())?;
            print!("{}", run_csp(&config, &action)?);
        }
        Command::Config { action } => handle_config_command(config.as_deref(), action)?,
    }

    Ok(())
}

// ============================================================================
// Menus and sitemaps
// ============================================================================

/// A loaded page table with the URL scheme of the site.
struct Site {
    repository: CachedPageRepository<MemoryPageRepository>,
    urls: AliasUrlGenerator,
}

impl Site {
    fn load(config: &TrellisConfig, pages_file: Option<&Path>) -> Result<Self> {
        let pages = config
            .load_pages(pages_file)
            .context("Unable to load the page table")?;

        Ok(Self {
            repository: CachedPageRepository::new(pages),
            urls: config.url_generator(),
        })
    }

    /// Builds the request context and visitor described by `args`.
    fn request(&self, args: &RequestArgs) -> Result<(RequestContext, Visitor)> {
        let active = match args.active {
            Some(id) => {
                let id = PageId::new(id);
                let page = self.repository.find_with_details(id)?;
                Some(page.with_context(|| format!("Active page {id} does not exist"))?)
            }
            None => None,
        };

        let path = match (&args.path, &active) {
            (Some(path), _) => path.clone(),
            (None, Some(page)) => self.urls.frontend_url(page).unwrap_or_else(|err| {
                log::warn!("{err}");
                String::new()
            }),
            (None, None) => String::new(),
        };

        let mut context = RequestContext::new(path).with_preview(args.preview);
        if let Some(page) = active {
            context = context.with_active_page(page);
        }

        let visitor = if args.member || !args.groups.is_empty() {
            Visitor::member(args.groups.clone())
        } else {
            Visitor::Guest
        };

        Ok((context, visitor))
    }
}

fn render(item: &MenuItem, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_outline(item)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(item)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Effective build options: configured defaults overridden by flags.
pub fn menu_options(defaults: &BuildOptions, args: &MenuArgs) -> BuildOptions {
    let mut options = defaults.clone();

    if args.show_hidden {
        options.show_hidden = true;
    }
    if args.show_protected {
        options.show_protected = true;
    }
    if args.hard_limit {
        options.hard_limit = true;
    }
    if let Some(level) = args.level {
        options.show_level = level;
    }
    if !args.pages.is_empty() {
        options.pages = args.pages.iter().copied().map(PageId::new).collect();
    }

    options
}

/// Renders the menu below `args.root`.
pub fn render_menu(
    config: &TrellisConfig,
    pages_file: Option<&Path>,
    args: &MenuArgs,
) -> Result<String> {
    let site = Site::load(config, pages_file)?;
    let (context, visitor) = site.request(&args.request)?;
    let options = menu_options(&config.menu, args);

    let builder = FrontendMenuBuilder::new(&site.repository, &visitor, &site.urls, &context);
    let root = PageId::new(args.root);
    let Some(menu) = builder.get_menu(root, &options) else {
        bail!("Page {root} does not exist or is not visible");
    };

    tracing::info!(
        root = %root,
        items = menu.count(),
        lookups = site.repository.backend_lookups(),
        "Built menu"
    );
    render(&menu, args.format)
}

/// Renders the sitemap below `args.root`, or of the active page's website.
pub fn render_sitemap(
    config: &TrellisConfig,
    pages_file: Option<&Path>,
    args: &SitemapArgs,
) -> Result<String> {
    let site = Site::load(config, pages_file)?;
    let (context, visitor) = site.request(&args.request)?;

    let builder = FrontendMenuBuilder::new(&site.repository, &visitor, &site.urls, &context);
    let sitemap = Sitemap::new(&builder).with_options(config.menu.clone());
    let root = sitemap.resolve_root(args.root.map(PageId::new));
    let Some(tree) = sitemap.build(Some(root)) else {
        bail!("Page {root} does not exist or is not visible");
    };

    tracing::info!(root = %root, items = tree.count(), "Built sitemap");
    render(&tree, args.format)
}

// ============================================================================
// CSP
// ============================================================================

/// Runs a `trellis csp` action.
pub fn run_csp(config: &TrellisConfig, action: &CspAction) -> Result<String> {
    match action {
        CspAction::Parse { header } => parse_csp(header),
        CspAction::Header {
            policy,
            nonce,
            report_only,
        } => csp_headers(config, policy.as_deref(), nonce, *report_only),
    }
}

/// Lists the directives of a header, one per line, then the normalized header.
pub fn parse_csp(header: &str) -> Result<String> {
    let directives = trellis_csp::CspParser::new().parse_header(header)?;

    let mut out = String::new();
    for (name, value) in directives.iter() {
        out.push_str(&format!("{name}: {value}\n"));
    }
    out.push_str(&format!("\n{directives}\n"));
    Ok(out)
}

/// Renders the response headers, one `Name: value` line each.
pub fn csp_headers(
    config: &TrellisConfig,
    policy: Option<&str>,
    nonce_directives: &[String],
    report_only: bool,
) -> Result<String> {
    let mut handler = config.csp_handler(policy)?;
    if report_only {
        handler = handler.with_report_only(true);
    }

    for directive in nonce_directives {
        match handler.nonce(directive)? {
            Some(nonce) => tracing::info!(directive = %directive, nonce = %nonce, "Added nonce"),
            None => tracing::warn!(directive = %directive, "Directive not set, no nonce added"),
        }
    }

    let mut out = String::new();
    for (name, value) in handler.headers() {
        out.push_str(&format!("{name}: {value}\n"));
    }
    Ok(out)
}
