//! Configuration file for the `trellis` CLI.
//!
//! ```toml
//! [site]
//! pages_file = "pages.toml"
//! url_suffix = ".html"
//! prepend_locale = false
//!
//! [menu]
//! show_level = 2
//!
//! [csp]
//! header = "default-src 'self'"
//! report_only = false
//! legacy_headers = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trellis_core::{AliasUrlGenerator, Error, MemoryPageRepository, Result};
use trellis_csp::{CspHandler, CspParser};
use trellis_menu::BuildOptions;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TRELLIS_CONFIG";

/// Name used for the config directory and in messages.
pub const PROJECT_NAME: &str = "trellis";

// ============================================================================
// Sections
// ============================================================================

/// The `[site]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// TOML page table, relative to the working directory.
    pub pages_file: PathBuf,
    /// Suffix appended to page aliases.
    pub url_suffix: String,
    /// Prefix URLs with the website language.
    pub prepend_locale: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            pages_file: PathBuf::from("pages.toml"),
            url_suffix: ".html".to_string(),
            prepend_locale: false,
        }
    }
}

/// The `[csp]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CspConfig {
    /// Policy header value.
    pub header: String,
    /// Send the policy as report-only.
    pub report_only: bool,
    /// Also send `X-Content-Security-Policy`.
    pub legacy_headers: bool,
}

impl Default for CspConfig {
    fn default() -> Self {
        Self {
            header: "default-src 'self'".to_string(),
            report_only: false,
            legacy_headers: false,
        }
    }
}

// ============================================================================
// TrellisConfig
// ============================================================================

/// Complete CLI configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    /// Page table and URL settings.
    pub site: SiteConfig,
    /// Default menu build options.
    pub menu: BuildOptions,
    /// Content-Security-Policy settings.
    pub csp: CspConfig,
}

impl TrellisConfig {
    /// The standard config location (`<config dir>/trellis/config.toml`).
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolves the config file: explicit path, then `TRELLIS_CONFIG`, then
    /// the standard location.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Loads the configuration.
    ///
    /// A missing file at the implicit locations yields the defaults; an
    /// explicitly named file must exist.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            log::debug!("No config directory on this platform, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    /// Reads a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// URL generator for the configured site.
    pub fn url_generator(&self) -> AliasUrlGenerator {
        AliasUrlGenerator::new(self.site.url_suffix.clone())
            .with_prepend_locale(self.site.prepend_locale)
    }

    /// Loads the page table, from `override_path` if given.
    pub fn load_pages(&self, override_path: Option<&Path>) -> Result<MemoryPageRepository> {
        let path = override_path.unwrap_or(&self.site.pages_file);
        log::debug!("Loading pages from {}", path.display());
        MemoryPageRepository::load(path)
    }

    /// CSP handler for the configured policy, or for `policy` if given.
    pub fn csp_handler(&self, policy: Option<&str>) -> trellis_csp::Result<CspHandler> {
        let header = policy.unwrap_or(&self.csp.header);
        let directives = CspParser::new().parse_header(header)?;

        Ok(CspHandler::new(directives)
            .with_report_only(self.csp.report_only)
            .with_legacy_headers(self.csp.legacy_headers))
    }
}

// ============================================================================
// Settings by dotted key
// ============================================================================

impl TrellisConfig {
    /// Returns the setting at a dotted key such as `site.url_suffix`.
    pub fn get(&self, key: &str) -> Result<toml::Value> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        key.split('.')
            .try_fold(&value, |value, part| value.get(part))
            .cloned()
            .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
    }

    /// Parses a command-line value for the setting at `key`.
    ///
    /// The setting decides the type: `true` stays a string for
    /// `site.url_suffix` and `menu.pages` takes comma-separated ids.
    pub fn parse_setting(key: &str, raw: &str) -> Result<toml::Value> {
        let invalid = || Error::config(format!("Invalid value for {key}: {raw}"));

        match Self::default().get(key)? {
            toml::Value::Boolean(_) => raw
                .parse()
                .map(toml::Value::Boolean)
                .map_err(|_| invalid()),
            toml::Value::Integer(_) => raw
                .parse()
                .map(toml::Value::Integer)
                .map_err(|_| invalid()),
            toml::Value::String(_) => Ok(toml::Value::String(raw.to_string())),
            toml::Value::Array(_) => raw
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| id.parse().map(toml::Value::Integer).map_err(|_| invalid()))
                .collect::<Result<Vec<_>>>()
                .map(toml::Value::Array),
            _ => Err(Error::config(format!("{key} cannot be set from the command line"))),
        }
    }
}

/// Renders a setting the way [`TrellisConfig::parse_setting`] reads it back.
///
/// Whole sections print as TOML.
pub fn format_setting(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(format_setting)
            .collect::<Vec<_>>()
            .join(","),
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}
