//! The CSP directive catalogue and directive sets.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Value syntax of a directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// A list of sources (`'self' https://cdn.example`).
    SrcList,
    /// A flag without value (`upgrade-insecure-requests`).
    NoValue,
    /// A list of MIME types.
    MediaTypeList,
    /// A reporting endpoint.
    ReportUri,
    /// Sandbox flags; the value is optional.
    Sandbox,
    /// Anything else, passed through verbatim.
    Other,
}

impl DirectiveKind {
    /// Whether the directive may be present without a value.
    pub fn allows_empty(self) -> bool {
        matches!(self, Self::NoValue | Self::Sandbox)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SrcList => "source list",
            Self::NoValue => "no value",
            Self::MediaTypeList => "media type list",
            Self::ReportUri => "report URI",
            Self::Sandbox => "sandbox",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Every known directive, in the order headers list them.
pub const DIRECTIVES: &[(&str, DirectiveKind)] = &[
    ("default-src", DirectiveKind::SrcList),
    ("base-uri", DirectiveKind::SrcList),
    ("block-all-mixed-content", DirectiveKind::NoValue),
    ("child-src", DirectiveKind::SrcList),
    ("connect-src", DirectiveKind::SrcList),
    ("font-src", DirectiveKind::SrcList),
    ("form-action", DirectiveKind::SrcList),
    ("frame-ancestors", DirectiveKind::SrcList),
    ("frame-src", DirectiveKind::SrcList),
    ("img-src", DirectiveKind::SrcList),
    ("manifest-src", DirectiveKind::SrcList),
    ("media-src", DirectiveKind::SrcList),
    ("object-src", DirectiveKind::SrcList),
    ("plugin-types", DirectiveKind::MediaTypeList),
    ("script-src", DirectiveKind::SrcList),
    ("style-src", DirectiveKind::SrcList),
    ("upgrade-insecure-requests", DirectiveKind::NoValue),
    ("report-uri", DirectiveKind::ReportUri),
    ("worker-src", DirectiveKind::SrcList),
    ("prefetch-src", DirectiveKind::SrcList),
    ("report-to", DirectiveKind::ReportUri),
    ("navigate-to", DirectiveKind::SrcList),
    ("script-src-attr", DirectiveKind::SrcList),
    ("script-src-elem", DirectiveKind::SrcList),
    ("style-src-attr", DirectiveKind::SrcList),
    ("style-src-elem", DirectiveKind::SrcList),
    ("sandbox", DirectiveKind::Sandbox),
    ("require-trusted-types-for", DirectiveKind::Other),
    ("trusted-types", DirectiveKind::Other),
];

/// Stored value of a value-less directive that is present.
pub const PRESENT: &str = "true";

fn position(name: &str) -> Option<usize> {
    DIRECTIVES.iter().position(|(known, _)| *known == name)
}

/// Returns the kind of a directive, or `None` for unknown names.
pub fn directive_kind(name: &str) -> Option<DirectiveKind> {
    DIRECTIVES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, kind)| *kind)
}

/// Returns the directive a source-list directive falls back to when unset.
///
/// `*-attr` and `*-elem` fall back to `script-src`/`style-src`, every other
/// source list to `default-src`.
pub fn fallback(name: &str) -> Option<&'static str> {
    match name {
        "script-src-attr" | "script-src-elem" => Some("script-src"),
        "style-src-attr" | "style-src-elem" => Some("style-src"),
        "default-src" => None,
        _ if directive_kind(name) == Some(DirectiveKind::SrcList) => Some("default-src"),
        _ => None,
    }
}

/// Signature sources (`nonce-…`, `sha384-…`) to append per directive.
pub type Signatures = BTreeMap<String, Vec<String>>;

// ============================================================================
// DirectiveSet
// ============================================================================

/// A set of directives with their values.
///
/// Directives are kept in catalogue order regardless of insertion order, so
/// equal policies always render to the same header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    values: BTreeMap<usize, String>,
}

impl DirectiveSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a directive. An empty value removes it.
    ///
    /// Value-less directives are stored as [`PRESENT`] when given an empty
    /// value or `true`.
    pub fn set_directive(&mut self, name: &str, value: &str) -> Result<()> {
        let index = position(name).ok_or_else(|| Error::unknown_directive(name))?;
        let kind = DIRECTIVES[index].1;
        let value = value.trim();

        match kind {
            DirectiveKind::NoValue if value.is_empty() || value == PRESENT => {
                self.values.insert(index, PRESENT.to_string());
            }
            DirectiveKind::NoValue => {
                log::warn!("Ignoring value of CSP directive {name}: {value}");
                self.values.insert(index, PRESENT.to_string());
            }
            _ if value.is_empty() => {
                self.values.remove(&index);
            }
            _ => {
                self.values.insert(index, value.to_string());
            }
        }

        Ok(())
    }

    /// Marks a value-less directive (or a sandbox without flags) as present.
    pub fn enable(&mut self, name: &str) -> Result<()> {
        let index = position(name).ok_or_else(|| Error::unknown_directive(name))?;
        self.values.insert(index, PRESENT.to_string());
        Ok(())
    }

    /// Removes a directive.
    pub fn remove_directive(&mut self, name: &str) {
        if let Some(index) = position(name) {
            self.values.remove(&index);
        }
    }

    /// Returns the value of a directive, if set.
    pub fn directive(&self, name: &str) -> Option<&str> {
        position(name)
            .and_then(|index| self.values.get(&index))
            .map(String::as_str)
    }

    /// Whether a directive is set (fallbacks are not considered).
    pub fn contains(&self, name: &str) -> bool {
        self.directive(name).is_some()
    }

    /// Number of set directives.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no directive is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over set directives in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values
            .iter()
            .map(|(index, value)| (DIRECTIVES[*index].0, value.as_str()))
    }

    /// Renders the header value, appending signature sources.
    ///
    /// A source-list directive with signatures but no value of its own is
    /// materialized from its fallback, so that the signatures do not widen
    /// into the fallback's scope. `'none'` is dropped from lists that gain
    /// signatures.
    pub fn build_header_value(&self, signatures: &Signatures) -> String {
        let mut parts = Vec::new();

        for (index, (name, kind)) in DIRECTIVES.iter().enumerate() {
            let own = self.values.get(&index).map(String::as_str);
            let extra = signatures
                .get(*name)
                .filter(|sources| !sources.is_empty() && *kind == DirectiveKind::SrcList);

            let value = match extra {
                Some(sources) => own
                    .or_else(|| self.resolve_fallback(name))
                    .map(|base| with_signatures(base, sources)),
                None => own.map(str::to_string),
            };

            match value {
                Some(value) if kind.allows_empty() && value == PRESENT => {
                    parts.push((*name).to_string());
                }
                Some(value) => parts.push(format!("{name} {value}")),
                None => {}
            }
        }

        parts.join("; ")
    }

    fn resolve_fallback(&self, name: &str) -> Option<&str> {
        let mut current = fallback(name);
        while let Some(name) = current {
            if let Some(value) = self.directive(name) {
                return Some(value);
            }
            current = fallback(name);
        }
        None
    }
}

impl fmt::Display for DirectiveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_header_value(&Signatures::new()))
    }
}

fn with_signatures(base: &str, signatures: &[String]) -> String {
    let mut sources: Vec<String> = base
        .split_whitespace()
        .filter(|source| *source != "'none'")
        .map(str::to_string)
        .collect();

    for signature in signatures {
        let quoted = format!("'{}'", signature.trim_matches('\''));
        if !sources.contains(&quoted) {
            sources.push(quoted);
        }
    }

    sources.join(" ")
}

// ============================================================================
// Tests
// ============================================================================
