//! Per-response CSP state: nonces, hashes, extra sources and headers.

use crate::directive::{DirectiveKind, DirectiveSet, Signatures, directive_kind, fallback};
use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Directives that accept nonces.
pub const NONCE_DIRECTIVES: &[&str] = &["script-src", "style-src", "script-src-elem", "style-src-elem"];

/// Directives that accept hash sources.
pub const HASH_DIRECTIVES: &[&str] = &[
    "script-src",
    "script-src-elem",
    "script-src-attr",
    "style-src",
    "style-src-elem",
    "style-src-attr",
];

/// Number of random bytes in a nonce.
pub const NONCE_BYTES: usize = 18;

/// Name of the enforcing header.
pub const HEADER_NAME: &str = "Content-Security-Policy";

/// Name of the legacy header some older browsers read.
pub const LEGACY_HEADER_NAME: &str = "X-Content-Security-Policy";

// ============================================================================
// HashAlgorithm
// ============================================================================

/// Digest used for hash sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
    /// SHA-384.
    #[default]
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// The algorithm prefix used in source expressions.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Base64 digest of `content`.
    pub fn digest(self, content: &str) -> String {
        match self {
            Self::Sha256 => STANDARD.encode(Sha256::digest(content.as_bytes())),
            Self::Sha384 => STANDARD.encode(Sha384::digest(content.as_bytes())),
            Self::Sha512 => STANDARD.encode(Sha512::digest(content.as_bytes())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

// ============================================================================
// RequestOrigin
// ============================================================================

/// Scheme and host of the current request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOrigin {
    /// URL scheme (`https`).
    pub scheme: String,
    /// Host, with port if non-default.
    pub host: String,
}

impl RequestOrigin {
    /// Creates an origin.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Completes a host-less source with this origin.
    ///
    /// Sources that already name a host, scheme-only sources (`data:`),
    /// wildcards and quoted keywords are returned unchanged.
    pub fn complete(&self, source: &str) -> String {
        let source = source.trim();

        if source.is_empty()
            || source.starts_with('\'')
            || source.contains("://")
            || source.ends_with(':')
            || source == "*"
        {
            return source.to_string();
        }

        if let Some(rest) = source.strip_prefix("//") {
            return format!("{}://{rest}", self.scheme);
        }

        if source.starts_with('/') {
            format!("{}://{}{source}", self.scheme, self.host)
        } else {
            format!("{}://{}/{source}", self.scheme, self.host)
        }
    }
}

// ============================================================================
// CspHandler
// ============================================================================

/// Policy state of one response.
///
/// The handler owns the directive set and collects nonces and hash sources
/// while the response is rendered. [`CspHandler::headers`] renders the
/// final header(s).
#[derive(Clone, Debug, Default)]
pub struct CspHandler {
    directives: DirectiveSet,
    report_only: bool,
    legacy_headers: bool,
    nonce: Option<String>,
    nonce_directives: BTreeSet<String>,
    signatures: Signatures,
}

impl CspHandler {
    /// Creates a handler for a policy.
    pub fn new(directives: DirectiveSet) -> Self {
        Self {
            directives,
            ..Self::default()
        }
    }

    /// Sends the policy as `Content-Security-Policy-Report-Only`.
    pub fn with_report_only(mut self, report_only: bool) -> Self {
        self.report_only = report_only;
        self
    }

    /// Also sends the legacy `X-Content-Security-Policy` header.
    pub fn with_legacy_headers(mut self, legacy_headers: bool) -> Self {
        self.legacy_headers = legacy_headers;
        self
    }

    /// The policy.
    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    /// The policy, mutably.
    pub fn directives_mut(&mut self) -> &mut DirectiveSet {
        &mut self.directives
    }

    /// Whether the policy is sent in report-only mode.
    pub fn report_only(&self) -> bool {
        self.report_only
    }

    /// Whether the legacy header is sent too.
    pub fn legacy_headers(&self) -> bool {
        self.legacy_headers
    }

    /// Returns the response nonce and allows it for `directive`.
    ///
    /// The nonce is generated once per handler. Returns `None` when neither
    /// the directive nor its fallback is set, as the nonce would have no
    /// effect.
    pub fn nonce(&mut self, directive: &str) -> Result<Option<String>> {
        if !NONCE_DIRECTIVES.contains(&directive) {
            return Err(Error::invalid_directive(directive, "nonces"));
        }

        if !self.is_directive_set(directive, true) {
            return Ok(None);
        }

        let nonce = self.nonce.get_or_insert_with(generate_nonce).clone();
        self.nonce_directives.insert(directive.to_string());

        Ok(Some(nonce))
    }

    /// Allows an inline script or style by hash and returns the base64 digest.
    ///
    /// Returns `None` when neither the directive nor its fallback is set.
    pub fn hash(
        &mut self,
        directive: &str,
        content: &str,
        algorithm: HashAlgorithm,
    ) -> Result<Option<String>> {
        if !HASH_DIRECTIVES.contains(&directive) {
            return Err(Error::invalid_directive(directive, "hashes"));
        }

        if !self.is_directive_set(directive, true) {
            return Ok(None);
        }

        let digest = algorithm.digest(content);
        self.signatures
            .entry(directive.to_string())
            .or_default()
            .push(format!("{algorithm}-{digest}"));

        Ok(Some(digest))
    }

    /// Appends `source` to a directive.
    ///
    /// With `auto_ignore`, nothing happens unless the directive or its
    /// fallback is set; adding a source to an unrestricted directive would
    /// otherwise tighten the policy.
    pub fn add_source(&mut self, directive: &str, source: &str, auto_ignore: bool) -> Result<()> {
        if directive_kind(directive).is_none() {
            return Err(Error::unknown_directive(directive));
        }

        if auto_ignore && !self.is_directive_set(directive, true) {
            log::debug!("Not adding {source} to unset CSP directive {directive}");
            return Ok(());
        }

        let value = match self.directives.directive(directive) {
            Some(current) => format!("{current} {source}"),
            None => source.to_string(),
        };
        self.directives.set_directive(directive, &value)
    }

    /// Like [`CspHandler::add_source`] with auto-ignore, completing host-less
    /// sources with the request origin first.
    pub fn add_request_source(
        &mut self,
        directive: &str,
        source: &str,
        origin: &RequestOrigin,
    ) -> Result<()> {
        self.add_source(directive, &origin.complete(source), true)
    }

    /// Whether a directive is set, optionally considering its fallbacks.
    pub fn is_directive_set(&self, directive: &str, include_fallback: bool) -> bool {
        if self.directives.contains(directive) {
            return true;
        }

        if !include_fallback || directive_kind(directive) != Some(DirectiveKind::SrcList) {
            return false;
        }

        fallback(directive).is_some_and(|parent| self.is_directive_set(parent, true))
    }

    /// Renders the header value with all nonces and hashes.
    pub fn header_value(&self) -> String {
        let mut signatures = self.signatures.clone();

        if let Some(nonce) = &self.nonce {
            for directive in &self.nonce_directives {
                signatures
                    .entry(directive.clone())
                    .or_default()
                    .push(format!("nonce-{nonce}"));
            }
        }

        self.directives.build_header_value(&signatures)
    }

    /// The headers to send, as `(name, value)` pairs.
    ///
    /// Empty when the policy is empty.
    pub fn headers(&self) -> Vec<(String, String)> {
        let value = self.header_value();
        if value.is_empty() {
            return Vec::new();
        }

        let suffix = if self.report_only { "-Report-Only" } else { "" };
        let mut headers = vec![(format!("{HEADER_NAME}{suffix}"), value.clone())];

        if self.legacy_headers {
            headers.push((format!("{LEGACY_HEADER_NAME}{suffix}"), value));
        }

        headers
    }
}

fn generate_nonce() -> String {
    let bytes: [u8; NONCE_BYTES] = rand::rng().random();
    STANDARD.encode(bytes)
}

// ============================================================================
// Tests
// ============================================================================
