//! Rendering orchestration.
//!
//! [`Redactor::render_fmt`] is the single entry point every derived `Debug`
//! and `Display` impl calls. It resolves the type's rendering mode once per
//! call (registered override, registered field rules, or the static schema)
//! and then lets the type walk its own fields through a [`FieldRenderer`].
//!
//! The output is Rust's structural `Debug` format, so `{:#?}` pretty printing
//! works unchanged. Masked values are printed as quoted strings.

use std::fmt;

use crate::{
    mask::{self, PLACEHOLDER},
    registry::{Registration, Registry, SchemaOverlay},
    rule::FieldRule,
    schema::{SensitiveType, SensitivitySchema},
    value::SensitiveValue,
};

/// Renders `value` through its `Debug` impl.
///
/// For types deriving `Sensitive` this is the masked rendering.
#[must_use]
pub fn render<T>(value: &T) -> String
where
    T: fmt::Debug + ?Sized,
{
    format!("{value:?}")
}

/// Multi-line variant of [`render`].
#[must_use]
pub fn render_pretty<T>(value: &T) -> String
where
    T: fmt::Debug + ?Sized,
{
    format!("{value:#?}")
}

/// Drives the rendering of [`SensitiveType`] values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Redactor;

impl Redactor {
    /// Writes the masked rendering of `value` into `f`.
    ///
    /// A registered override owns the whole output. Otherwise the value walks
    /// its fields, with rules taken from the registry overlay (if any) or the
    /// static schema.
    pub fn render_fmt<T>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: SensitiveType,
    {
        let registered = value
            .as_any()
            .and_then(|any| Some((any, Registry::global()?.lookup(any.type_id())?)));

        match registered {
            Some((any, Registration::Override(hook))) => hook(any, f),
            Some((_, Registration::Schema(overlay))) => {
                value.render_fields(&mut FieldRenderer::new(f, T::SCHEMA, Some(overlay)))
            }
            None => value.render_fields(&mut FieldRenderer::new(f, T::SCHEMA, None)),
        }
    }
}

/// A field value handed to a [`FieldRenderer`].
#[derive(Clone, Copy)]
pub enum FieldValue<'v> {
    /// A field declared sensitive: always masked.
    Sensitive(&'v dyn SensitiveValue),
    /// An unannotated field that a registered rule could mask.
    Leaf {
        value: &'v dyn SensitiveValue,
        debug: &'v dyn fmt::Debug,
    },
    /// Any other unannotated field: rendered through its own `Debug`.
    Plain(&'v dyn fmt::Debug),
}

impl<'v> FieldValue<'v> {
    pub fn sensitive<V>(value: &'v V) -> Self
    where
        V: SensitiveValue,
    {
        FieldValue::Sensitive(value)
    }

    pub fn plain<V>(value: &'v V) -> Self
    where
        V: fmt::Debug,
    {
        FieldValue::Plain(value)
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Sensitive(_) => f.write_str("Sensitive(..)"),
            FieldValue::Leaf { .. } => f.write_str("Leaf(..)"),
            FieldValue::Plain(_) => f.write_str("Plain(..)"),
        }
    }
}

/// What ends up in the output for one field.
enum Shown<'v> {
    Masked(String),
    Placeholder(&'static str),
    Raw(&'v dyn fmt::Debug),
}

impl fmt::Debug for Shown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shown::Masked(masked) => fmt::Debug::fmt(masked.as_str(), f),
            Shown::Placeholder(placeholder) => fmt::Debug::fmt(*placeholder, f),
            Shown::Raw(value) => fmt::Debug::fmt(*value, f),
        }
    }
}

/// Rule lookup for one render call.
#[derive(Clone, Copy)]
struct Rules {
    schema: &'static SensitivitySchema,
    overlay: Option<&'static SchemaOverlay>,
}

impl Rules {
    fn rule(self, index: usize) -> Option<FieldRule> {
        self.overlay
            .and_then(|overlay| overlay.rule(index))
            .or_else(|| self.schema.fields().get(index)?.rule())
    }

    fn name(self, index: usize) -> &'static str {
        self.schema
            .fields()
            .get(index)
            .map_or("?", |field| field.name())
    }

    fn show(self, index: usize, value: FieldValue<'_>) -> Shown<'_> {
        if index >= self.schema.fields().len() {
            return Shown::Placeholder(PLACEHOLDER);
        }
        match (value, self.rule(index)) {
            (FieldValue::Sensitive(value) | FieldValue::Leaf { value, .. }, Some(rule)) => {
                Shown::Masked(mask::apply(value, &rule))
            }
            (FieldValue::Sensitive(_), None) => Shown::Placeholder(PLACEHOLDER),
            (FieldValue::Plain(_), Some(rule)) => {
                Shown::Placeholder(mask::placeholder(rule.kind()))
            }
            (FieldValue::Leaf { debug, .. } | FieldValue::Plain(debug), None) => {
                Shown::Raw(debug)
            }
        }
    }
}

/// Writes a value's fields, masking the ones that carry a rule.
///
/// Handed to [`SensitiveType::render_fields`]. Fields are addressed by their
/// index in the type's [`SensitivitySchema`]; an index outside the schema is
/// rendered as a placeholder.
pub struct FieldRenderer<'a, 'f> {
    f: &'a mut fmt::Formatter<'f>,
    rules: Rules,
}

impl<'a, 'f> FieldRenderer<'a, 'f> {
    pub(crate) fn new(
        f: &'a mut fmt::Formatter<'f>,
        schema: &'static SensitivitySchema,
        overlay: Option<&'static SchemaOverlay>,
    ) -> Self {
        Self {
            f,
            rules: Rules { schema, overlay },
        }
    }

    /// Starts a `Name { field: value, .. }` rendering.
    pub fn named(&mut self, name: &str) -> NamedFields<'_, 'f> {
        NamedFields {
            inner: self.f.debug_struct(name),
            rules: self.rules,
        }
    }

    /// Starts a `Name(value, ..)` rendering.
    pub fn tuple(&mut self, name: &str) -> TupleFields<'_, 'f> {
        TupleFields {
            inner: self.f.debug_tuple(name),
            rules: self.rules,
        }
    }

    /// Renders a value without fields.
    pub fn unit(&mut self, name: &str) -> fmt::Result {
        self.f.write_str(name)
    }

    /// The underlying formatter, for hand-written renderers.
    pub fn formatter(&mut self) -> &mut fmt::Formatter<'f> {
        self.f
    }

    /// The rule in effect for the field at `index`.
    pub fn rule(&self, index: usize) -> Option<FieldRule> {
        self.rules.rule(index)
    }
}

impl fmt::Debug for FieldRenderer<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRenderer")
            .field("type_name", &self.rules.schema.type_name())
            .field("overlay", &self.rules.overlay.is_some())
            .finish()
    }
}

/// Named-field rendering started by [`FieldRenderer::named`].
pub struct NamedFields<'a, 'f> {
    inner: fmt::DebugStruct<'a, 'f>,
    rules: Rules,
}

impl NamedFields<'_, '_> {
    pub fn field(&mut self, index: usize, value: FieldValue<'_>) -> &mut Self {
        let name = self.rules.name(index);
        self.inner.field(name, &self.rules.show(index, value));
        self
    }

    pub fn finish(&mut self) -> fmt::Result {
        self.inner.finish()
    }
}

/// Positional rendering started by [`FieldRenderer::tuple`].
pub struct TupleFields<'a, 'f> {
    inner: fmt::DebugTuple<'a, 'f>,
    rules: Rules,
}

impl TupleFields<'_, '_> {
    pub fn field(&mut self, index: usize, value: FieldValue<'_>) -> &mut Self {
        self.inner.field(&self.rules.show(index, value));
        self
    }

    pub fn finish(&mut self) -> fmt::Result {
        self.inner.finish()
    }
}
