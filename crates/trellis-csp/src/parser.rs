//! Parsing of `Content-Security-Policy` header values.

use crate::directive::{DirectiveSet, PRESENT, directive_kind};
use crate::error::{Error, Result};

/// Source keywords that must appear single-quoted.
const KEYWORDS: &[&str] = &[
    "self",
    "none",
    "unsafe-inline",
    "unsafe-eval",
    "strict-dynamic",
    "unsafe-hashes",
    "report-sample",
    "unsafe-allow-redirects",
    "wasm-unsafe-eval",
];

/// Prefixes of signature sources, which must appear single-quoted too.
const SIGNATURE_PREFIXES: &[&str] = &["nonce-", "sha256-", "sha384-", "sha512-"];

/// Parses CSP header values into [`DirectiveSet`]s.
///
/// # Example
///
/// ```
/// use trellis_csp::CspParser;
///
/// let set = CspParser::new().parse_header("default-src self; img-src * data:")?;
/// assert_eq!(set.directive("default-src"), Some("'self'"));
/// assert_eq!(set.to_string(), "default-src 'self'; img-src * data:");
/// # Ok::<(), trellis_csp::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CspParser;

impl CspParser {
    /// Creates a parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a header value (`name value; name value; ...`).
    ///
    /// Empty segments are skipped. Value-less directives that take no value
    /// (and `sandbox`) become present; other value-less directives are
    /// ignored. Unknown directive names are an error.
    pub fn parse_header(&self, header: &str) -> Result<DirectiveSet> {
        let mut set = DirectiveSet::new();

        for segment in header.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let (name, value) = segment
                .split_once(char::is_whitespace)
                .map_or((segment, ""), |(name, value)| (name, value.trim()));
            let name = name.to_ascii_lowercase();
            let kind = directive_kind(&name).ok_or_else(|| Error::unknown_directive(&name))?;

            if value.is_empty() && kind.allows_empty() {
                set.set_directive(&name, PRESENT)?;
            } else {
                set.set_directive(&name, &self.parse_source_list(value))?;
            }
        }

        Ok(set)
    }

    /// Normalises a source list: keywords and signature sources are quoted,
    /// whitespace is collapsed.
    pub fn parse_source_list(&self, value: &str) -> String {
        value
            .split_whitespace()
            .map(normalize_source)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn normalize_source(source: &str) -> String {
    let lower = source.to_ascii_lowercase();

    if KEYWORDS.contains(&lower.as_str()) {
        return format!("'{lower}'");
    }

    if SIGNATURE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return format!("'{source}'");
    }

    source.to_string()
}
