//! Startup-time registration of rules and custom renderers.
//!
//! The derive covers types you own. The [`Registry`] covers the rest: rules for
//! the fields of a type that carries no `#[sensitive(...)]` attributes, and
//! hand-written renderers that replace a type's output entirely.
//!
//! A registry is built once, validated eagerly, and installed into a
//! process-wide slot. After installation it is read-only, so renders from any
//! number of threads see the same configuration without locking.
//!
//! ```rust
//! use sensitive_info::{FieldRule, Registry, Sensitive};
//!
//! #[derive(Sensitive)]
//! struct Session {
//!     user: String,
//!     token: String,
//! }
//!
//! let registry = Registry::builder()
//!     .schema::<Session, _, _>([("token", FieldRule::text().with_visibility(2))])?
//!     .build();
//! assert!(registry.is_registered::<Session>());
//! # Ok::<(), sensitive_info::RegistryError>(())
//! ```

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::OnceLock,
};

use thiserror::Error;

use crate::{
    mask::PLACEHOLDER,
    rule::{FieldRule, RuleError},
    schema::SensitiveType,
};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

type OverrideHook = Box<dyn Fn(&dyn Any, &mut fmt::Formatter<'_>) -> fmt::Result + Send + Sync>;

/// Field rules registered for a type, indexed like its schema fields.
#[derive(Debug)]
pub(crate) struct SchemaOverlay {
    rules: Box<[Option<FieldRule>]>,
}

impl SchemaOverlay {
    pub(crate) fn rule(&self, index: usize) -> Option<FieldRule> {
        self.rules.get(index).copied().flatten()
    }
}

/// How a registered type renders. A type has at most one registration.
pub(crate) enum Registration {
    Schema(SchemaOverlay),
    Override(OverrideHook),
}

struct Entry {
    type_name: &'static str,
    registration: Registration,
}

/// Errors raised while building or installing a [`Registry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("`{type_name}` has no field `{field}`")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },
    #[error("field `{field}` of `{type_name}` is registered twice")]
    DuplicateField {
        type_name: &'static str,
        field: String,
    },
    #[error("invalid rule for field `{field}` of `{type_name}`")]
    InvalidRule {
        type_name: &'static str,
        field: String,
        #[source]
        source: RuleError,
    },
    #[error("`{type_name}` already declares field rules with `#[sensitive(...)]`")]
    DeclaredRules { type_name: &'static str },
    #[error("`{type_name}` is rendered by a `render_with` function")]
    CustomRendering { type_name: &'static str },
    #[error("`{type_name}` is already registered")]
    AlreadyRegistered { type_name: &'static str },
    #[error("`{type_name}` is generic and cannot be registered")]
    Unregistrable { type_name: &'static str },
    #[error("a registry is already installed")]
    AlreadyInstalled,
}

/// Immutable table of runtime registrations, keyed by type.
pub struct Registry {
    entries: HashMap<TypeId, Entry>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The installed registry, if any.
    #[must_use]
    pub fn global() -> Option<&'static Registry> {
        GLOBAL.get()
    }

    /// Installs this registry for the rest of the process.
    ///
    /// Values rendered before installation use their static schemas only.
    pub fn install(self) -> Result<&'static Registry, RegistryError> {
        let mut installed = false;
        let registry = GLOBAL.get_or_init(|| {
            installed = true;
            self
        });
        if installed {
            Ok(registry)
        } else {
            Err(RegistryError::AlreadyInstalled)
        }
    }

    #[must_use]
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn lookup(&self, type_id: TypeId) -> Option<&Registration> {
        self.entries.get(&type_id).map(|entry| &entry.registration)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self
            .entries
            .values()
            .map(|entry| {
                let kind = match entry.registration {
                    Registration::Schema(_) => "schema",
                    Registration::Override(_) => "override",
                };
                (entry.type_name, kind)
            })
            .collect();
        entries.sort_unstable();
        f.debug_map().entries(entries).finish()
    }
}

/// Collects registrations and validates each one as it is added.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<TypeId, Entry>,
}

impl RegistryBuilder {
    /// Registers field rules for `T`.
    ///
    /// Keys follow [`FieldSchema`](crate::FieldSchema) naming: `"field"` for
    /// structs, `"0"` for tuple fields, `"Variant.field"` for enums. `T` must
    /// not declare rules of its own.
    pub fn schema<T, I, K>(mut self, rules: I) -> Result<Self, RegistryError>
    where
        T: SensitiveType + 'static,
        I: IntoIterator<Item = (K, FieldRule)>,
        K: AsRef<str>,
    {
        let schema = T::SCHEMA;
        let type_name = schema.type_name();
        self.check_vacant::<T>()?;
        if schema.is_custom() {
            return Err(RegistryError::CustomRendering { type_name });
        }
        if schema.has_rules() {
            return Err(RegistryError::DeclaredRules { type_name });
        }

        let mut overlay = vec![None; schema.fields().len()];
        for (key, rule) in rules {
            let field = key.as_ref();
            rule.validate()
                .map_err(|source| RegistryError::InvalidRule {
                    type_name,
                    field: field.to_string(),
                    source,
                })?;
            let index = schema
                .field_index(field)
                .ok_or_else(|| RegistryError::UnknownField {
                    type_name,
                    field: field.to_string(),
                })?;
            if overlay[index].replace(rule).is_some() {
                return Err(RegistryError::DuplicateField {
                    type_name,
                    field: field.to_string(),
                });
            }
        }

        self.insert::<T>(Registration::Schema(SchemaOverlay {
            rules: overlay.into_boxed_slice(),
        }));
        Ok(self)
    }

    /// Registers a renderer that owns the whole output of `T`.
    ///
    /// The hook replaces both the static schema and any `render_with`
    /// function declared on the type.
    pub fn render_with<T, F>(mut self, hook: F) -> Result<Self, RegistryError>
    where
        T: SensitiveType + 'static,
        F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result + Send + Sync + 'static,
    {
        self.check_vacant::<T>()?;
        let hook: OverrideHook = Box::new(move |any, f| match any.downcast_ref::<T>() {
            Some(value) => hook(value, f),
            None => fmt::Debug::fmt(PLACEHOLDER, f),
        });
        self.insert::<T>(Registration::Override(hook));
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }

    fn check_vacant<T>(&self) -> Result<(), RegistryError>
    where
        T: SensitiveType + 'static,
    {
        let type_name = T::SCHEMA.type_name();
        if !T::SCHEMA.is_registrable() {
            return Err(RegistryError::Unregistrable { type_name });
        }
        if self.entries.contains_key(&TypeId::of::<T>()) {
            return Err(RegistryError::AlreadyRegistered { type_name });
        }
        Ok(())
    }

    fn insert<T>(&mut self, registration: Registration)
    where
        T: SensitiveType + 'static,
    {
        self.entries.insert(
            TypeId::of::<T>(),
            Entry {
                type_name: T::SCHEMA.type_name(),
                registration,
            },
        );
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        redactor::FieldRenderer,
        schema::{FieldSchema, SensitivitySchema},
    };

    const PLAIN_FIELDS: &[FieldSchema] = &[FieldSchema::new("a", None), FieldSchema::new("b", None)];
    const RULED_FIELDS: &[FieldSchema] = &[FieldSchema::new("a", Some(FieldRule::email()))];

    struct Plain;

    impl SensitiveType for Plain {
        const SCHEMA: &'static SensitivitySchema =
            &SensitivitySchema::new("Plain", PLAIN_FIELDS).registrable();

        fn render_fields(&self, fields: &mut FieldRenderer<'_, '_>) -> fmt::Result {
            fields.unit("Plain")
        }
    }

    struct Ruled;

    impl SensitiveType for Ruled {
        const SCHEMA: &'static SensitivitySchema =
            &SensitivitySchema::new("Ruled", RULED_FIELDS).registrable();

        fn render_fields(&self, fields: &mut FieldRenderer<'_, '_>) -> fmt::Result {
            fields.unit("Ruled")
        }
    }

    struct Generic;

    impl SensitiveType for Generic {
        const SCHEMA: &'static SensitivitySchema = &SensitivitySchema::new("Generic", &[]);

        fn render_fields(&self, fields: &mut FieldRenderer<'_, '_>) -> fmt::Result {
            fields.unit("Generic")
        }
    }

    #[test]
    fn schema_overlay_is_indexed_by_field() {
        let registry = Registry::builder()
            .schema::<Plain, _, _>([("b", FieldRule::text())])
            .unwrap()
            .build();
        let Some(Registration::Schema(overlay)) = registry.lookup(TypeId::of::<Plain>()) else {
            panic!("expected a schema registration");
        };
        assert_eq!(overlay.rule(0), None);
        assert_eq!(overlay.rule(1), Some(FieldRule::text()));
        assert_eq!(overlay.rule(7), None);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Registry::builder()
            .schema::<Plain, _, _>([("missing", FieldRule::text())])
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownField { ref field, .. } if field == "missing"));
        assert_eq!(err.to_string(), "`Plain` has no field `missing`");
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let err = Registry::builder()
            .schema::<Plain, _, _>([("a", FieldRule::text()), ("a", FieldRule::number())])
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateField { .. }));
    }

    #[test]
    fn invalid_rule_is_rejected() {
        let err = Registry::builder()
            .schema::<Plain, _, _>([("a", FieldRule::date().with_visibility(2))])
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidRule {
                source: RuleError::VisibilityOnDate,
                ..
            }
        ));
    }

    #[test]
    fn fully_revealed_date_pattern_is_rejected() {
        let err = Registry::builder()
            .schema::<Plain, _, _>([("a", FieldRule::date_with_pattern("[dd]/[MM]/[yyyy]"))])
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidRule {
                source: RuleError::InvalidPattern { .. },
                ..
            }
        ));
    }

    #[test]
    fn schema_over_declared_rules_is_rejected() {
        let err = Registry::builder()
            .schema::<Ruled, _, _>([("a", FieldRule::text())])
            .unwrap_err();
        assert!(matches!(err, RegistryError::DeclaredRules { .. }));
    }

    #[test]
    fn override_over_declared_rules_is_allowed() {
        let registry = Registry::builder()
            .render_with::<Ruled, _>(|_, f| f.write_str("custom"))
            .unwrap()
            .build();
        assert!(registry.is_registered::<Ruled>());
    }

    #[test]
    fn second_registration_is_rejected() {
        let err = Registry::builder()
            .schema::<Plain, _, _>([("a", FieldRule::text())])
            .unwrap()
            .render_with::<Plain, _>(|_, f| f.write_str("custom"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered { .. }));
    }

    #[test]
    fn generic_types_are_not_registrable() {
        let err = Registry::builder()
            .render_with::<Generic, _>(|_, f| f.write_str("custom"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Unregistrable { .. }));
    }

    #[test]
    fn debug_lists_registered_types() {
        let registry = Registry::builder()
            .schema::<Plain, _, _>(Vec::<(&str, FieldRule)>::new())
            .unwrap()
            .render_with::<Ruled, _>(|_, f| f.write_str("custom"))
            .unwrap()
            .build();
        assert_eq!(
            format!("{registry:?}"),
            r#"{"Plain": "schema", "Ruled": "override"}"#
        );
        assert_eq!(registry.len(), 2);
    }
}
