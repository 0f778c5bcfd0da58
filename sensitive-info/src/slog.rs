//! Adapters for emitting masked values through `slog`.
//!
//! Types deriving `Sensitive` implement `slog::Value` directly when the `slog`
//! feature is enabled, so they can be logged as key-value pairs:
//!
//! ```ignore
//! info!(logger, "customer updated"; "customer" => &customer);
//! ```
//!
//! The logged value is the masked rendering, emitted through
//! `Serializer::emit_arguments`. The raw value never reaches the serializer.
//!
//! For values that are `Debug` but not `slog::Value` (std containers of
//! sensitive types, for instance) wrap them with [`Rendered`].

use std::fmt;

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

/// Emits the `Debug` rendering of `value` under `key`.
///
/// Called by the derived `slog::Value` impls.
pub fn emit<T>(value: &T, key: Key, serializer: &mut dyn Serializer) -> SlogResult
where
    T: fmt::Debug + ?Sized,
{
    serializer.emit_arguments(key, &format_args!("{value:?}"))
}

/// A `slog::Value` that logs the masked rendering of a borrowed value.
pub struct Rendered<'a, T: ?Sized> {
    value: &'a T,
}

impl<'a, T> Rendered<'a, T>
where
    T: fmt::Debug + ?Sized,
{
    pub fn new(value: &'a T) -> Self {
        Self { value }
    }
}

impl<T> SlogValue for Rendered<'_, T>
where
    T: fmt::Debug + ?Sized,
{
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit(self.value, key, serializer)
    }
}

/// Wraps values into a [`Rendered`] `slog::Value`.
///
/// ```ignore
/// use sensitive_info::slog::AsRendered;
///
/// info!(logger, "batch"; "customers" => customers.rendered());
/// ```
pub trait AsRendered: fmt::Debug {
    fn rendered(&self) -> Rendered<'_, Self> {
        Rendered::new(self)
    }
}

impl<T> AsRendered for T where T: fmt::Debug + ?Sized {}
