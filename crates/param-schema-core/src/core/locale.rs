// crates/param-schema-core/src/core/locale.rs
// ============================================================================
// Module: Locale Resolution
// Description: Supported locale codes, translation tables, and token lookup.
// Purpose: Map arbitrary locale identifiers onto a closed set of codes and
//          localize tokens without ever failing.
// Dependencies: param-template, serde
// ============================================================================

//! ## Overview
//! Locale handling is total. Any identifier resolves to a supported
//! [`LocaleCode`] (falling back to [`LocaleCode::DEFAULT`]), and any token
//! localizes to some string (falling back to the token itself).
//!
//! ## Invariants
//! - The supported set is closed and ordered for deterministic matching.
//! - A [`LocalizationTable`] is never mutated while a render is in progress.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use param_template::FilterRegistry;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Locale Codes
// ============================================================================

/// Name under which the locale substitution filter is registered.
pub const LOCALE_FILTER: &str = "i18n";

/// Supported locale codes.
///
/// # Invariants
/// - [`LocaleCode::Zh`] is the fallback code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// Chinese (default).
    Zh,
    /// English.
    En,
}

/// Ordered list of supported locale codes.
pub const SUPPORTED_LOCALES: &[LocaleCode] = &[LocaleCode::Zh, LocaleCode::En];

impl LocaleCode {
    /// Fallback code used when an identifier matches nothing.
    pub const DEFAULT: Self = Self::Zh;

    /// Returns the canonical code label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    /// Matches an identifier against the supported codes by language prefix.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace, so
    /// `en-US`, `en_gb` and `EN` all select [`LocaleCode::En`].
    #[must_use]
    pub fn parse(identifier: &str) -> Option<Self> {
        let normalized = identifier.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return None;
        }
        SUPPORTED_LOCALES.iter().copied().find(|code| normalized.starts_with(code.as_str()))
    }

    /// Resolves an identifier, falling back to [`LocaleCode::DEFAULT`].
    #[must_use]
    pub fn resolve(identifier: &str) -> Self {
        Self::parse(identifier).unwrap_or(Self::DEFAULT)
    }
}

impl Default for LocaleCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Localization Table
// ============================================================================

/// Translation table: locale code → (source token → localized token).
///
/// Keys are plain code strings so tables authored for other locales load
/// without error; only supported codes are ever consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizationTable(BTreeMap<String, BTreeMap<String, String>>);

impl LocalizationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one translation.
    pub fn insert(
        &mut self,
        code: impl Into<String>,
        token: impl Into<String>,
        localized: impl Into<String>,
    ) {
        self.0.entry(code.into()).or_default().insert(token.into(), localized.into());
    }

    /// Builder-style variant of [`LocalizationTable::insert`].
    #[must_use]
    pub fn with_entry(
        mut self,
        code: impl Into<String>,
        token: impl Into<String>,
        localized: impl Into<String>,
    ) -> Self {
        self.insert(code, token, localized);
        self
    }

    /// Looks up `token` for `code`, returning the token unchanged when absent.
    #[must_use]
    pub fn lookup<'a>(&'a self, code: LocaleCode, token: &'a str) -> &'a str {
        self.0
            .get(code.as_str())
            .and_then(|catalog| catalog.get(token))
            .map_or(token, String::as_str)
    }

    /// Returns the catalog stored for a code label.
    #[must_use]
    pub fn catalog(&self, code: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(code)
    }

    /// Returns true when the table holds no catalogs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, BTreeMap<String, String>>> for LocalizationTable {
    fn from(catalogs: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self(catalogs)
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolved locale bound to one translation table for a single compilation.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    /// Resolved locale code.
    code: LocaleCode,
    /// Shared, read-only translation table.
    table: Arc<LocalizationTable>,
}

impl LocaleResolver {
    /// Resolves `identifier` and binds it to `table`.
    #[must_use]
    pub fn new(identifier: &str, table: LocalizationTable) -> Self {
        Self::with_code(LocaleCode::resolve(identifier), table)
    }

    /// Binds an already resolved code to `table`.
    #[must_use]
    pub fn with_code(code: LocaleCode, table: LocalizationTable) -> Self {
        Self {
            code,
            table: Arc::new(table),
        }
    }

    /// Returns the resolved code.
    #[must_use]
    pub const fn code(&self) -> LocaleCode {
        self.code
    }

    /// Localizes a token; absent tokens come back unchanged.
    #[must_use]
    pub fn localize(&self, token: &str) -> String {
        self.table.lookup(self.code, token).to_string()
    }

    /// Registers this resolver as the [`LOCALE_FILTER`] filter.
    pub fn register_filter(&self, filters: &mut FilterRegistry) {
        let resolver = self.clone();
        filters.register(LOCALE_FILTER, move |token: &str| resolver.localize(token));
    }
}
