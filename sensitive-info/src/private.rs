//! Support code for the `Sensitive` derive. Not public API.
//!
//! Unannotated fields need different treatment depending on their type: a
//! [`SensitiveValue`] leaf can still be masked by a registered rule, anything
//! else only needs `Debug`. The derive cannot see types, so it emits
//! `(&Probe(field)).field_value()` and lets method resolution pick the most
//! specific impl: [`ViaLeaf`] is found first when it applies, [`ViaDebug`]
//! one auto-ref later.

use std::fmt;

use crate::{redactor::FieldValue, value::SensitiveValue};

/// Fallback path for the derive's `slog::Value` impl in crates that do not
/// depend on `slog` themselves.
#[cfg(feature = "slog")]
pub use ::slog;

pub struct Probe<'v, T: ?Sized>(pub &'v T);

pub trait ViaLeaf<'v> {
    fn field_value(&self) -> FieldValue<'v>;
}

impl<'v, T> ViaLeaf<'v> for Probe<'v, T>
where
    T: SensitiveValue + fmt::Debug,
{
    fn field_value(&self) -> FieldValue<'v> {
        FieldValue::Leaf {
            value: self.0,
            debug: self.0,
        }
    }
}

pub trait ViaDebug<'v> {
    fn field_value(&self) -> FieldValue<'v>;
}

impl<'v, T> ViaDebug<'v> for &Probe<'v, T>
where
    T: fmt::Debug,
{
    fn field_value(&self) -> FieldValue<'v> {
        FieldValue::Plain(self.0)
    }
}
