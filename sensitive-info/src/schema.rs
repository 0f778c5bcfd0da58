//! Per-type sensitivity metadata.
//!
//! - [`SensitivitySchema`]: the static description of a type's fields and rules
//! - [`FieldSchema`]: one field of that description
//! - [`SensitiveType`]: types that *contain* sensitive data (structs, enums)
//!
//! Schemas are `const` data emitted by `#[derive(Sensitive)]`. They are built
//! once at compile time and consulted on every render; nothing is discovered
//! per call.

use std::{any::Any, fmt};

use crate::{redactor::FieldRenderer, rule::FieldRule};

/// One field of a [`SensitivitySchema`].
///
/// Struct fields are keyed by name (`"email"`), tuple fields by position
/// (`"0"`). Enum variant fields are keyed `"Variant.field"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSchema {
    variant: Option<&'static str>,
    name: &'static str,
    rule: Option<FieldRule>,
}

impl FieldSchema {
    #[must_use]
    pub const fn new(name: &'static str, rule: Option<FieldRule>) -> Self {
        Self {
            variant: None,
            name,
            rule,
        }
    }

    /// A field of the enum variant `variant`.
    #[must_use]
    pub const fn variant_field(
        variant: &'static str,
        name: &'static str,
        rule: Option<FieldRule>,
    ) -> Self {
        Self {
            variant: Some(variant),
            name,
            rule,
        }
    }

    #[must_use]
    pub const fn variant(&self) -> Option<&'static str> {
        self.variant
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The rule declared on the field, if any.
    #[must_use]
    pub const fn rule(&self) -> Option<FieldRule> {
        self.rule
    }

    /// Whether `key` identifies this field.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        match self.variant {
            Some(variant) => key
                .split_once('.')
                .is_some_and(|(v, name)| v == variant && name == self.name),
            None => key == self.name,
        }
    }
}

impl fmt::Display for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant {
            Some(variant) => write!(f, "{variant}.{}", self.name),
            None => f.write_str(self.name),
        }
    }
}

/// Static description of a type's sensitive fields.
///
/// Built by the derive as a `const`:
///
/// ```rust
/// use sensitive_info::{FieldRule, FieldSchema, SensitivitySchema};
///
/// const FIELDS: &[FieldSchema] = &[
///     FieldSchema::new("name", None),
///     FieldSchema::new("email", Some(FieldRule::email())),
/// ];
/// const SCHEMA: SensitivitySchema = SensitivitySchema::new("Customer", FIELDS);
///
/// assert_eq!(SCHEMA.rule("email"), Some(FieldRule::email()));
/// assert_eq!(SCHEMA.rule("name"), None);
/// assert!(SCHEMA.has_rules());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensitivitySchema {
    type_name: &'static str,
    fields: &'static [FieldSchema],
    custom: bool,
    registrable: bool,
}

impl SensitivitySchema {
    #[must_use]
    pub const fn new(type_name: &'static str, fields: &'static [FieldSchema]) -> Self {
        Self {
            type_name,
            fields,
            custom: false,
            registrable: false,
        }
    }

    /// Marks the type as rendered by a hand-written function instead of a field walk.
    #[must_use]
    pub const fn custom(self) -> Self {
        Self {
            custom: true,
            ..self
        }
    }

    /// Marks the type as eligible for runtime registration.
    ///
    /// Only types without generic parameters are keyed in the
    /// [`Registry`](crate::Registry).
    #[must_use]
    pub const fn registrable(self) -> Self {
        Self {
            registrable: true,
            ..self
        }
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fields in declaration order.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldSchema] {
        self.fields
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&'static FieldSchema> {
        self.fields.iter().find(|field| field.matches(key))
    }

    #[must_use]
    pub fn field_index(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.matches(key))
    }

    #[must_use]
    pub fn rule(&self, key: &str) -> Option<FieldRule> {
        self.field(key).and_then(FieldSchema::rule)
    }

    /// Whether any field carries a declared rule.
    #[must_use]
    pub fn has_rules(&self) -> bool {
        self.fields.iter().any(|field| field.rule.is_some())
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        self.custom
    }

    #[must_use]
    pub const fn is_registrable(&self) -> bool {
        self.registrable
    }
}

// =============================================================================
// SensitiveType - Types that CONTAIN sensitive data (containers)
// =============================================================================

/// A type whose rendering masks its sensitive fields.
///
/// Implemented by `#[derive(Sensitive)]`. The generated `Debug` and `Display`
/// impls route through [`Redactor::render_fmt`](crate::Redactor::render_fmt),
/// which looks up runtime registrations and then calls
/// [`render_fields`](Self::render_fields).
///
/// Manual impls are possible but rarely needed: prefer
/// `#[sensitive(render_with = "...")]` for hand-written output.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `SensitiveType`",
    label = "this type has no sensitivity schema",
    note = "use `#[derive(Sensitive)]` on the type definition"
)]
pub trait SensitiveType {
    /// The type's static schema.
    const SCHEMA: &'static SensitivitySchema;

    /// `Some(self)` for registrable types, so registry entries can be keyed
    /// by `TypeId`.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }

    /// Writes the structural rendering of `self`, one field at a time.
    fn render_fields(&self, fields: &mut FieldRenderer<'_, '_>) -> fmt::Result;
}
