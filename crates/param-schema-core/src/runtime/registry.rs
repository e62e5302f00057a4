// crates/param-schema-core/src/runtime/registry.rs
// ============================================================================
// Module: Field Registry
// Description: Type-tag to field-constructor table.
// Purpose: Construct typed fields for cleaned parameters.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Each supported [`ParameterType`] maps 1:1 to a [`FieldSpec`]. The standard
//! registry is built once per process and only ever read afterwards. Custom
//! registries may cover a subset of tags; assembling a parameter whose tag is
//! missing fails with [`FieldTypeNotFoundError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::OnceLock;

use thiserror::Error;

use crate::core::CharStyle;
use crate::core::CleanedParameter;
use crate::core::Field;
use crate::core::FieldOptions;
use crate::core::ParameterType;

// ============================================================================
// SECTION: Field Specs
// ============================================================================

/// Field constructor signature.
pub type FieldConstructor = fn(&str, &FieldOptions) -> Field;

/// Constructor bound to one type tag.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Type tag this spec constructs.
    pub tag: ParameterType,
    /// Field constructor.
    pub construct: FieldConstructor,
}

impl FieldSpec {
    /// Builds a field for `parameter`.
    #[must_use]
    pub fn build(&self, parameter: &CleanedParameter) -> Field {
        (self.construct)(&parameter.name, &parameter.options)
    }
}

/// Raised when no spec is registered for a cleaned parameter's tag.
///
/// Normalization only emits supported tags, so with the standard registry
/// this indicates a registry that disagrees with the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no field type registered for `{kind}` (parameter `{name}`)")]
pub struct FieldTypeNotFoundError {
    /// Parameter name.
    pub name: String,
    /// Unregistered type tag.
    pub kind: ParameterType,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Map from type tag to field spec.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    /// Specs keyed by tag.
    specs: BTreeMap<ParameterType, FieldSpec>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared registry covering every supported tag.
    #[must_use]
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<FieldRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Self::new()
                .with_spec(ParameterType::String, string_field)
                .with_spec(ParameterType::Integer, Field::integer)
                .with_spec(ParameterType::Text, text_field)
                .with_spec(ParameterType::Password, password_field)
        })
    }

    /// Registers a constructor, replacing any previous one for `tag`.
    pub fn register(&mut self, tag: ParameterType, construct: FieldConstructor) {
        self.specs.insert(
            tag,
            FieldSpec {
                tag,
                construct,
            },
        );
    }

    /// Builder-style variant of [`FieldRegistry::register`].
    #[must_use]
    pub fn with_spec(mut self, tag: ParameterType, construct: FieldConstructor) -> Self {
        self.register(tag, construct);
        self
    }

    /// Returns the spec for `tag`.
    #[must_use]
    pub fn get(&self, tag: ParameterType) -> Option<&FieldSpec> {
        self.specs.get(&tag)
    }

    /// Returns registered tags in order.
    pub fn tags(&self) -> impl Iterator<Item = ParameterType> + '_ {
        self.specs.keys().copied()
    }

    /// Builds the field for `parameter`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldTypeNotFoundError`] when the tag is not registered.
    pub fn build(&self, parameter: &CleanedParameter) -> Result<Field, FieldTypeNotFoundError> {
        self.get(parameter.kind).map(|spec| spec.build(parameter)).ok_or_else(|| {
            FieldTypeNotFoundError {
                name: parameter.name.clone(),
                kind: parameter.kind,
            }
        })
    }
}

// ============================================================================
// SECTION: Standard Constructors
// ============================================================================

/// Single-line character field.
fn string_field(name: &str, options: &FieldOptions) -> Field {
    Field::char(name, CharStyle::Plain, options)
}

/// Multi-line character field.
fn text_field(name: &str, options: &FieldOptions) -> Field {
    Field::char(name, CharStyle::Text, options)
}

/// Masked character field.
fn password_field(name: &str, options: &FieldOptions) -> Field {
    Field::char(name, CharStyle::Password, options)
}

#[cfg(test)]
mod tests {
    use super::FieldRegistry;
    use crate::core::CleanedParameter;
    use crate::core::FieldOptions;
    use crate::core::PARAMETER_TYPES;
    use crate::core::ParameterType;

    #[test]
    fn standard_registry_covers_every_type() {
        let tags: Vec<ParameterType> = FieldRegistry::standard().tags().collect();
        let mut expected = PARAMETER_TYPES.to_vec();
        expected.sort();
        assert_eq!(tags, expected);
    }

    #[test]
    fn built_fields_report_their_type() {
        for kind in PARAMETER_TYPES {
            let parameter = CleanedParameter {
                name: "value".to_string(),
                kind: *kind,
                options: FieldOptions::default(),
            };
            let field = FieldRegistry::standard().build(&parameter);
            assert_eq!(field.map(|field| field.parameter_type()), Ok(*kind));
        }
    }

    #[test]
    fn missing_spec_is_reported() {
        let registry = FieldRegistry::new().with_spec(ParameterType::Integer, crate::core::Field::integer);
        let parameter = CleanedParameter {
            name: "url".to_string(),
            kind: ParameterType::String,
            options: FieldOptions::default(),
        };
        let error = registry.build(&parameter).err();
        assert_eq!(error.map(|error| error.kind), Some(ParameterType::String));
    }
}
