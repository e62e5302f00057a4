// crates/param-schema-config/src/config.rs
// ============================================================================
// Module: Param Schema Configuration
// Description: Configuration loading and validation for the schema compiler.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: param-schema-core, param-template, serde, serde_yaml, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The file is optional when discovered implicitly: with no explicit path, no
//! environment override, and no default file present, defaults apply.
//! Explicitly named files must exist and must validate.
//!
//! ```toml
//! [compiler]
//! default_locale = "zh"
//! max_document_bytes = 1048576
//! max_parameters = 512
//!
//! [localization]
//! table_path = "i18n.yaml"
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use param_schema_core::CompilerLimits;
use param_schema_core::LocaleCode;
use param_schema_core::LocalizationTable;
use param_schema_core::SchemaCompiler;
use param_schema_core::runtime::DEFAULT_MAX_PARAMETERS;
use param_template::MAX_TEMPLATE_BYTES;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "param-schema.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PARAM_SCHEMA_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum localization table file size in bytes.
pub const MAX_LOCALIZATION_FILE_SIZE: usize = 4 * 1024 * 1024;
/// Upper bound accepted for `compiler.max_parameters`.
pub const MAX_PARAMETERS_LIMIT: usize = 4096;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Root configuration for the schema compiler tooling.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaToolConfig {
    /// Compiler defaults and limits.
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Localization table source.
    #[serde(default)]
    pub localization: LocalizationConfig,
    /// Path the configuration was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl SchemaToolConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        Self::load_file(&resolved)
    }

    /// Loads configuration when present, falling back to defaults only when
    /// nothing names a file and the default file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a named file cannot be loaded or validated.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some() || env::var_os(CONFIG_ENV_VAR).is_some();
        let resolved = resolve_path(path)?;
        if !explicit && !resolved.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&resolved)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compiler.validate()?;
        self.localization.validate()?;
        Ok(())
    }

    /// Builds a compiler from the configured limits and default locale.
    #[must_use]
    pub fn build_compiler(&self) -> SchemaCompiler {
        SchemaCompiler::new(self.compiler.limits()).with_default_locale(self.compiler.locale())
    }

    /// Loads the configured localization table, or an empty table when none
    /// is configured. Relative paths resolve against the config file's
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the table cannot be read or parsed.
    pub fn load_localization_table(&self) -> Result<LocalizationTable, ConfigError> {
        let Some(table_path) = &self.localization.table_path else {
            return Ok(LocalizationTable::new());
        };
        let table_path = Path::new(table_path.trim());
        let resolved = match self.source_path.as_deref().and_then(Path::parent) {
            Some(base) if table_path.is_relative() => base.join(table_path),
            _ => table_path.to_path_buf(),
        };
        read_localization_table(&resolved)
    }

    /// Reads, size-checks, and validates one config file.
    fn load_file(resolved: &Path) -> Result<Self, ConfigError> {
        validate_path(resolved)?;
        let content = read_limited(resolved, MAX_CONFIG_FILE_SIZE, "config file")?;
        let mut config = Self::from_toml_str(&content)?;
        config.source_path = Some(resolved.to_path_buf());
        Ok(config)
    }
}

/// Compiler defaults and limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Locale identifier used when a request names none.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Maximum document size in bytes.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
    /// Maximum number of entries per document.
    #[serde(default = "default_max_parameters")]
    pub max_parameters: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            max_document_bytes: default_max_document_bytes(),
            max_parameters: default_max_parameters(),
        }
    }
}

impl CompilerConfig {
    /// Validates compiler configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if LocaleCode::parse(&self.default_locale).is_none() {
            return Err(ConfigError::Invalid(format!(
                "compiler.default_locale is not a supported locale: {}",
                self.default_locale
            )));
        }
        if self.max_document_bytes == 0 || self.max_document_bytes > MAX_TEMPLATE_BYTES {
            return Err(ConfigError::Invalid(
                "compiler.max_document_bytes out of range".to_string(),
            ));
        }
        if self.max_parameters == 0 || self.max_parameters > MAX_PARAMETERS_LIMIT {
            return Err(ConfigError::Invalid("compiler.max_parameters out of range".to_string()));
        }
        Ok(())
    }

    /// Returns the configured limits.
    #[must_use]
    pub const fn limits(&self) -> CompilerLimits {
        CompilerLimits {
            max_document_bytes: self.max_document_bytes,
            max_parameters: self.max_parameters,
        }
    }

    /// Returns the configured default locale code.
    #[must_use]
    pub fn locale(&self) -> LocaleCode {
        LocaleCode::resolve(&self.default_locale)
    }
}

/// Localization table source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalizationConfig {
    /// Optional YAML or JSON translation table file.
    #[serde(default)]
    pub table_path: Option<String>,
}

impl LocalizationConfig {
    /// Validates localization configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.table_path {
            validate_path_string("localization.table_path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML or table parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Localization Tables
// ============================================================================

/// Reads a YAML or JSON translation table from disk.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file is too large, not UTF-8, or not a
/// `code -> token -> text` mapping.
pub fn read_localization_table(path: &Path) -> Result<LocalizationTable, ConfigError> {
    validate_path(path)?;
    let content = read_limited(path, MAX_LOCALIZATION_FILE_SIZE, "localization table")?;
    parse_localization_table(&content)
}

/// Parses YAML or JSON translation table text; empty text is an empty table.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the text is not a valid table.
pub fn parse_localization_table(content: &str) -> Result<LocalizationTable, ConfigError> {
    if content.trim().is_empty() {
        return Ok(LocalizationTable::new());
    }
    serde_yaml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default locale identifier.
fn default_locale() -> String {
    LocaleCode::DEFAULT.as_str().to_string()
}

/// Default maximum document size.
const fn default_max_document_bytes() -> usize {
    MAX_TEMPLATE_BYTES
}

/// Default maximum entry count.
const fn default_max_parameters() -> usize {
    DEFAULT_MAX_PARAMETERS
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Reads a UTF-8 file no larger than `limit` bytes.
fn read_limited(path: &Path, limit: usize, what: &str) -> Result<String, ConfigError> {
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > limit {
        return Err(ConfigError::Invalid(format!("{what} exceeds size limit")));
    }
    String::from_utf8(bytes).map_err(|_| ConfigError::Invalid(format!("{what} must be utf-8")))
}
