// crates/param-schema-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalogs and translation utilities for the CLI.
// Purpose: Centralize user-facing strings in English and Chinese.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The param-schema CLI stores user-facing strings in small translation
//! catalogs so messaging stays consistent across commands. All runtime output
//! should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - Catalogs are initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Simplified Chinese.
    Zh,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Zh];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the active CLI locale, defaulting to English.
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "param-schema {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.serialize_failed", "Failed to serialize output: {error}"),
    ("input.kind.document", "parameter document"),
    ("input.kind.input", "input data"),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("input.not_utf8", "The {kind} at {path} is not valid UTF-8."),
    ("input.parse_failed", "Failed to parse {kind} JSON at {path}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("localization.load_failed", "Failed to load localization table: {error}"),
    ("compile.failed", "Failed to compile {path}: {error}"),
    ("compile.var.invalid", "Invalid variable '{value}'. Expected NAME=VALUE."),
    ("compile.text.header", "Schema {name} ({count} fields)"),
    ("compile.text.field", "  {name}: {kind} [{flags}]"),
    ("compile.text.required", "required"),
    ("compile.text.optional", "optional"),
    ("compile.text.write_only", "write-only"),
    (
        "validate.failed",
        "Input failed validation: {fields} field error(s), {general} non-field error(s).",
    ),
    ("log.filter.invalid", "Ignoring invalid log filter in {env}: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'zh'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Chinese catalog entries.
const CATALOG_ZH: &[(&str, &str)] = &[
    ("main.version", "param-schema {version}"),
    ("output.stream.stdout", "标准输出"),
    ("output.stream.stderr", "标准错误"),
    ("output.stream.unknown", "输出"),
    ("output.write_failed", "写入{stream}失败：{error}"),
    ("output.serialize_failed", "序列化输出失败：{error}"),
    ("input.kind.document", "参数文档"),
    ("input.kind.input", "输入数据"),
    ("input.read_failed", "读取位于 {path} 的{kind}失败：{error}"),
    ("input.read_too_large", "拒绝读取位于 {path} 的{kind}：大小为 {size} 字节（上限 {limit}）。"),
    ("input.not_utf8", "位于 {path} 的{kind}不是有效的 UTF-8。"),
    ("input.parse_failed", "解析位于 {path} 的{kind} JSON 失败：{error}"),
    ("config.load_failed", "加载配置失败：{error}"),
    ("config.validate.ok", "配置有效。"),
    ("localization.load_failed", "加载本地化表失败：{error}"),
    ("compile.failed", "编译 {path} 失败：{error}"),
    ("compile.var.invalid", "无效的变量 '{value}'。应为 NAME=VALUE。"),
    ("compile.text.header", "模式 {name}（{count} 个字段）"),
    ("compile.text.field", "  {name}：{kind} [{flags}]"),
    ("compile.text.required", "必填"),
    ("compile.text.optional", "可选"),
    ("compile.text.write_only", "只写"),
    ("validate.failed", "输入校验失败：{fields} 个字段错误，{general} 个非字段错误。"),
    ("log.filter.invalid", "忽略 {env} 中无效的日志过滤器：{error}"),
    ("i18n.lang.invalid_env", "{env} 的值无效：{value}。应为 'en' 或 'zh'。"),
    ("i18n.disclaimer.machine_translated", "注意：非英文输出为机器翻译，可能不准确。"),
];

/// Returns the raw catalog entries for the requested locale.
#[cfg(test)]
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Zh => CATALOG_ZH,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_ZH_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Zh => CATALOG_ZH_MAP.get_or_init(|| CATALOG_ZH.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
