// crates/param-template/src/filters.rs
// ============================================================================
// Module: Filter Registry
// Description: Explicit name-to-function table for template filters.
// Purpose: Keep template evaluation closed over a fixed, caller-chosen set of
//          pure string transformations.
// Dependencies: Standard library collections and `Arc`.
// ============================================================================

//! ## Overview
//! Filters are pure `&str -> String` functions addressed by name. Templates
//! bind filters at parse time, so an unknown filter name is a syntax error
//! rather than a render-time surprise. Callers build a registry per render
//! scope; the locale substitution filter, for example, captures one locale and
//! one translation table and is registered under `i18n` by the schema compiler.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Shared filter function.
pub type FilterFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Registry of named template filters.
///
/// # Invariants
/// - Filter functions are pure; rendering relies on them never failing.
/// - Registering a name twice replaces the earlier filter.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    /// Filters keyed by name.
    filters: BTreeMap<String, FilterFn>,
}

impl FilterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in text filters
    /// (`upper`, `lower`, `trim`, `title`).
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("upper", str::to_uppercase);
        registry.register("lower", str::to_lowercase);
        registry.register("trim", |value: &str| value.trim().to_string());
        registry.register("title", title_case);
        registry
    }

    /// Registers a filter under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, filter: F) -> &mut Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.filters.insert(name.into(), Arc::new(filter));
        self
    }

    /// Builder-style variant of [`FilterRegistry::register`].
    #[must_use]
    pub fn with_filter<F>(mut self, name: impl Into<String>, filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.register(name, filter);
        self
    }

    /// Returns the filter registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FilterFn> {
        self.filters.get(name)
    }

    /// Returns true when a filter named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Returns registered filter names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.filters.keys()).finish()
    }
}

// ============================================================================
// SECTION: Built-in Filters
// ============================================================================

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
#[must_use]
pub fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_alpha = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_alpha {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            previous_alpha = true;
        } else {
            output.push(ch);
            previous_alpha = false;
        }
    }
    output
}
