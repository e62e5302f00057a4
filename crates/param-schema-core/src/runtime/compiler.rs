// crates/param-schema-core/src/runtime/compiler.rs
// ============================================================================
// Module: Schema Compiler
// Description: Render, decode, normalize, and assemble parameter documents.
// Purpose: Drive one document through the full pipeline into a schema.
// Dependencies: crate::{core, interfaces, runtime}, param-template, thiserror, tracing
// ============================================================================

//! ## Overview
//! Compilation is a pure function of its inputs: the document text, a locale,
//! a translation table, render variables, the field registry, and limits.
//! Stages run in a fixed order:
//! 1. size check;
//! 2. render with the built-in filters plus the locale filter;
//! 3. decode into raw entries;
//! 4. entry-count check;
//! 5. normalize, skipping bad entries;
//! 6. assemble fields, last definition of a name winning.
//!
//! A compiler holds no mutable state and may be shared across threads.
//!
//! Security posture: documents are semi-trusted configuration; size and
//! entry-count limits apply before any per-entry work.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use param_template::FilterRegistry;
use param_template::MAX_TEMPLATE_BYTES;
use param_template::RenderContext;
use param_template::Template;
use param_template::TemplateSyntaxError;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::CleanedParameter;
use crate::core::CompiledSchema;
use crate::core::Field;
use crate::core::LocaleCode;
use crate::core::LocaleResolver;
use crate::core::LocalizationTable;
use crate::core::SchemaName;
use crate::interfaces::DocumentDecoder;
use crate::interfaces::DocumentParseError;
use crate::interfaces::YamlDocumentDecoder;
use crate::runtime::normalizer::normalize_with_report;
use crate::runtime::registry::FieldRegistry;
use crate::runtime::registry::FieldTypeNotFoundError;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum number of raw entries per document.
pub const DEFAULT_MAX_PARAMETERS: usize = 512;

/// Resource limits applied per compilation.
///
/// # Invariants
/// - Documents over [`MAX_TEMPLATE_BYTES`] are rejected by the template parser
///   whatever `max_document_bytes` says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerLimits {
    /// Maximum document size in bytes, before rendering.
    pub max_document_bytes: usize,
    /// Maximum number of raw entries after decoding.
    pub max_parameters: usize,
}

impl Default for CompilerLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: MAX_TEMPLATE_BYTES,
            max_parameters: DEFAULT_MAX_PARAMETERS,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal compilation errors. Bad entries are skipped, never reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Document template is malformed.
    #[error("template syntax error: {0}")]
    TemplateSyntax(#[from] TemplateSyntaxError),
    /// Rendered document is not a well-formed entry sequence.
    #[error("document parse error: {0}")]
    DocumentParse(#[from] DocumentParseError),
    /// Registry has no constructor for a cleaned parameter's type.
    #[error("field type not found: {0}")]
    FieldTypeNotFound(#[from] FieldTypeNotFoundError),
    /// Document exceeds the configured size limit.
    #[error("document is {actual_bytes} bytes, limit is {max_bytes}")]
    InputTooLarge {
        /// Configured limit.
        max_bytes: usize,
        /// Actual size.
        actual_bytes: usize,
    },
    /// Document holds more entries than allowed.
    #[error("document has {actual} entries, limit is {max}")]
    TooManyParameters {
        /// Configured limit.
        max: usize,
        /// Actual entry count.
        actual: usize,
    },
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Inputs for compiling one text document.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Name carried by the resulting schema.
    pub schema_name: SchemaName,
    /// Raw, unrendered document text.
    pub document: String,
    /// Requested locale identifier; `None` selects the compiler default.
    pub locale: Option<String>,
    /// Translation table.
    pub table: LocalizationTable,
    /// Variables available to template expressions.
    pub variables: RenderContext,
}

impl CompileRequest {
    /// Creates a request with no locale, an empty table, and no variables.
    #[must_use]
    pub fn new(schema_name: impl Into<SchemaName>, document: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            document: document.into(),
            locale: None,
            table: LocalizationTable::new(),
            variables: RenderContext::new(),
        }
    }

    /// Sets the locale identifier.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the translation table.
    #[must_use]
    pub fn with_table(mut self, table: LocalizationTable) -> Self {
        self.table = table;
        self
    }

    /// Adds a render variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name, value);
        self
    }
}

// ============================================================================
// SECTION: Compiler
// ============================================================================

/// Stateless parameter-document compiler.
#[derive(Clone)]
pub struct SchemaCompiler {
    /// Field constructors by type tag.
    registry: Cow<'static, FieldRegistry>,
    /// Structured-document decoder.
    decoder: Arc<dyn DocumentDecoder + Send + Sync>,
    /// Resource limits.
    limits: CompilerLimits,
    /// Locale used when a request names none.
    default_locale: LocaleCode,
}

impl SchemaCompiler {
    /// Creates a compiler using the standard registry and YAML decoding.
    #[must_use]
    pub fn new(limits: CompilerLimits) -> Self {
        Self {
            registry: Cow::Borrowed(FieldRegistry::standard()),
            decoder: Arc::new(YamlDocumentDecoder),
            limits,
            default_locale: LocaleCode::DEFAULT,
        }
    }

    /// Creates a compiler using a custom registry.
    #[must_use]
    pub fn with_registry(registry: FieldRegistry, limits: CompilerLimits) -> Self {
        Self {
            registry: Cow::Owned(registry),
            ..Self::new(limits)
        }
    }

    /// Replaces the document decoder.
    #[must_use]
    pub fn with_decoder(mut self, decoder: impl DocumentDecoder + Send + Sync + 'static) -> Self {
        self.decoder = Arc::new(decoder);
        self
    }

    /// Sets the locale used when a request names none.
    #[must_use]
    pub fn with_default_locale(mut self, locale: LocaleCode) -> Self {
        self.default_locale = locale;
        self
    }

    /// Returns the active limits.
    #[must_use]
    pub const fn limits(&self) -> CompilerLimits {
        self.limits
    }

    /// Returns the locale used when a request names none.
    #[must_use]
    pub const fn default_locale(&self) -> LocaleCode {
        self.default_locale
    }

    /// Compiles a text document.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the document is too large, fails to
    /// render or decode, holds too many entries, or names an unregistered type.
    pub fn compile(&self, request: &CompileRequest) -> Result<CompiledSchema, CompileError> {
        let actual_bytes = request.document.len();
        if actual_bytes > self.limits.max_document_bytes {
            return Err(CompileError::InputTooLarge {
                max_bytes: self.limits.max_document_bytes,
                actual_bytes,
            });
        }
        let resolver = self.resolver(request.locale.as_deref(), request.table.clone());
        let filters = locale_filters(&resolver);
        let template = Template::parse(&request.document, &filters)?;
        let rendered = template.render(&request.variables);
        tracing::debug!(
            schema = %request.schema_name,
            locale = %resolver.code(),
            substitutions = template.substitution_count(),
            "rendered parameter document"
        );

        let entries = self.decoder.decode(&rendered)?;
        tracing::debug!(schema = %request.schema_name, entries = entries.len(), "decoded parameter document");
        self.check_entry_count(entries.len())?;
        self.finish(request.schema_name.clone(), &entries)
    }

    /// Compiles already decoded entries, rendering each string value in place.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when an entry holds a malformed template,
    /// there are too many entries, or a type is unregistered.
    pub fn compile_parameters(
        &self,
        schema_name: impl Into<SchemaName>,
        entries: &[Value],
        locale: Option<&str>,
        table: &LocalizationTable,
    ) -> Result<CompiledSchema, CompileError> {
        let schema_name = schema_name.into();
        self.check_entry_count(entries.len())?;
        let resolver = self.resolver(locale, table.clone());
        let filters = locale_filters(&resolver);
        let context = RenderContext::new();
        let rendered = entries
            .iter()
            .map(|entry| render_leaves(entry, &filters, &context))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            schema = %schema_name,
            locale = %resolver.code(),
            entries = rendered.len(),
            "rendered structured parameters"
        );
        self.finish(schema_name, &rendered)
    }

    /// Assembles cleaned parameters into a schema.
    ///
    /// A repeated name replaces the earlier field but keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`FieldTypeNotFoundError`] when a type is unregistered.
    pub fn assemble(
        &self,
        schema_name: SchemaName,
        parameters: &[CleanedParameter],
    ) -> Result<CompiledSchema, FieldTypeNotFoundError> {
        let mut fields: Vec<(String, Field)> = Vec::with_capacity(parameters.len());
        let mut positions: BTreeMap<&str, usize> = BTreeMap::new();
        for parameter in parameters {
            let field = self.registry.build(parameter)?;
            if let Some(&position) = positions.get(parameter.name.as_str()) {
                tracing::debug!(
                    schema = %schema_name,
                    field = %parameter.name,
                    "duplicate parameter name replaces earlier definition"
                );
                if let Some(slot) = fields.get_mut(position) {
                    slot.1 = field;
                }
            } else {
                positions.insert(parameter.name.as_str(), fields.len());
                fields.push((parameter.name.clone(), field));
            }
        }
        Ok(CompiledSchema::new(schema_name, fields))
    }

    /// Binds the requested or default locale to `table`.
    fn resolver(&self, locale: Option<&str>, table: LocalizationTable) -> LocaleResolver {
        let code = locale.map_or(self.default_locale, LocaleCode::resolve);
        LocaleResolver::with_code(code, table)
    }

    /// Enforces the entry-count limit.
    const fn check_entry_count(&self, actual: usize) -> Result<(), CompileError> {
        if actual > self.limits.max_parameters {
            return Err(CompileError::TooManyParameters {
                max: self.limits.max_parameters,
                actual,
            });
        }
        Ok(())
    }

    /// Normalizes and assembles rendered entries.
    fn finish(
        &self,
        schema_name: SchemaName,
        entries: &[Value],
    ) -> Result<CompiledSchema, CompileError> {
        let report = normalize_with_report(entries);
        let schema = self.assemble(schema_name, &report.parameters)?;
        tracing::info!(
            schema = %schema.name(),
            fields = schema.len(),
            skipped = report.skipped.len(),
            "compiled parameter schema"
        );
        Ok(schema)
    }
}

impl Default for SchemaCompiler {
    fn default() -> Self {
        Self::new(CompilerLimits::default())
    }
}

impl fmt::Debug for SchemaCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaCompiler")
            .field("registry", &self.registry)
            .field("limits", &self.limits)
            .field("default_locale", &self.default_locale)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the filter set for one render: built-ins plus the locale filter.
fn locale_filters(resolver: &LocaleResolver) -> FilterRegistry {
    let mut filters = FilterRegistry::with_builtins();
    resolver.register_filter(&mut filters);
    filters
}

/// Renders every string value inside `value`; keys are left as written.
fn render_leaves(
    value: &Value,
    filters: &FilterRegistry,
    context: &RenderContext,
) -> Result<Value, TemplateSyntaxError> {
    match value {
        Value::String(text) => {
            Ok(Value::String(Template::parse(text, filters)?.render(context)))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| render_leaves(item, filters, context))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut rendered = Map::with_capacity(map.len());
            for (key, item) in map {
                rendered.insert(key.clone(), render_leaves(item, filters, context)?);
            }
            Ok(Value::Object(rendered))
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.clone()),
    }
}

// ============================================================================
// SECTION: Convenience
// ============================================================================

/// Compiles `text` with the standard registry and default limits.
///
/// # Errors
///
/// Returns [`CompileError`] when compilation fails.
pub fn compile_schema(
    schema_name: impl Into<SchemaName>,
    text: &str,
    table: &LocalizationTable,
    locale: Option<&str>,
) -> Result<CompiledSchema, CompileError> {
    let mut request = CompileRequest::new(schema_name, text).with_table(table.clone());
    if let Some(locale) = locale {
        request = request.with_locale(locale);
    }
    SchemaCompiler::default().compile(&request)
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        reason = "Test assertions use expect/unwrap for clarity."
    )]

    use serde_json::json;

    use super::CompileError;
    use super::CompilerLimits;
    use super::SchemaCompiler;
    use crate::core::LocalizationTable;
    use crate::core::SchemaName;
    use crate::runtime::normalizer::normalize_parameters;

    #[test]
    fn assemble_keeps_first_position_for_duplicates() {
        let compiler = SchemaCompiler::default();
        let parameters = normalize_parameters(&[
            json!({"name": "host", "type": "string"}),
            json!({"name": "port", "type": "integer"}),
            json!({"name": "host", "type": "text", "label": "Host"}),
        ]);
        let schema = compiler.assemble(SchemaName::new("Dup"), &parameters).unwrap();
        let names: Vec<&str> = schema.field_names().collect();
        assert_eq!(names, vec!["host", "port"]);
        let host = schema.field("host").unwrap();
        assert_eq!(host.options().label.as_deref(), Some("Host"));
    }

    #[test]
    fn entry_limit_is_enforced() {
        let compiler = SchemaCompiler::new(CompilerLimits {
            max_parameters: 1,
            ..CompilerLimits::default()
        });
        let entries = [json!({"name": "a", "type": "string"}), json!({"name": "b", "type": "string"})];
        let result = compiler.compile_parameters("Limited", &entries, None, &LocalizationTable::new());
        assert_eq!(
            result.err(),
            Some(CompileError::TooManyParameters {
                max: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn structured_entries_render_nested_strings() {
        let table = LocalizationTable::new().with_entry("en", "Port", "Port number");
        let entries = [json!({
            "name": "port",
            "type": "integer",
            "label": "{{ 'Port' | i18n }}",
            "help_text": "{{ 'between 1 and 65535' | upper }}",
        })];
        let schema = SchemaCompiler::default()
            .compile_parameters("Structured", &entries, Some("en-US"), &table)
            .unwrap();
        let port = schema.field("port").unwrap();
        assert_eq!(port.options().label.as_deref(), Some("Port number"));
        assert_eq!(port.options().help_text.as_deref(), Some("BETWEEN 1 AND 65535"));
    }
}
