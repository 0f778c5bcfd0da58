//! Leaf values that a [`FieldRule`](crate::FieldRule) can mask.
//!
//! The masking engine works on text: every [`SensitiveValue`] exposes a
//! literal form. Calendar types additionally expose [`DateParts`] so that date
//! patterns do not have to re-parse a formatted string.
//!
//! | Type | Literal |
//! |------|---------|
//! | `str`, `String`, `Cow<str>`, `Box<str>` | the text itself |
//! | integers, floats | their `Display` form |
//! | `Option<T>` | the inner literal, or empty for `None` |
//! | `&T` | the referent's literal |
//! | `chrono` dates (feature `chrono`) | `Display` form plus calendar parts |

use std::borrow::Cow;

/// Year, month and day of a calendar value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateParts {
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

// =============================================================================
// SensitiveValue - Types that ARE sensitive data (leaf values)
// =============================================================================

/// A value that a masking rule can be applied to.
///
/// ## Foreign types
///
/// If the sensitive field type comes from another crate, you cannot implement
/// `SensitiveValue` for it directly (Rust's orphan rules). Define a local
/// newtype and implement `SensitiveValue` for the wrapper, or leave the field
/// unannotated and mask it in a `render_with` function.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `SensitiveValue`",
    label = "a masking rule cannot be applied to this type",
    note = "rules like `#[sensitive(text)]` are for leaf values (strings, numbers, dates)",
    note = "if `{Self}` derives `Sensitive`, leave the field unannotated: it masks itself"
)]
pub trait SensitiveValue {
    /// The text the masking engine operates on.
    fn literal(&self) -> Cow<'_, str>;

    /// Calendar components, for values that are dates.
    fn date_parts(&self) -> Option<DateParts> {
        None
    }
}

impl SensitiveValue for str {
    fn literal(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl SensitiveValue for String {
    fn literal(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl SensitiveValue for Cow<'_, str> {
    fn literal(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl SensitiveValue for Box<str> {
    fn literal(&self) -> Cow<'_, str> {
        Cow::Borrowed(&**self)
    }
}

impl<T> SensitiveValue for &T
where
    T: SensitiveValue + ?Sized,
{
    fn literal(&self) -> Cow<'_, str> {
        (**self).literal()
    }

    fn date_parts(&self) -> Option<DateParts> {
        (**self).date_parts()
    }
}

impl<T> SensitiveValue for Option<T>
where
    T: SensitiveValue,
{
    fn literal(&self) -> Cow<'_, str> {
        self.as_ref()
            .map_or(Cow::Borrowed(""), SensitiveValue::literal)
    }

    fn date_parts(&self) -> Option<DateParts> {
        self.as_ref().and_then(SensitiveValue::date_parts)
    }
}

macro_rules! impl_sensitive_value_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SensitiveValue for $ty {
                fn literal(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_sensitive_value_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

#[cfg(feature = "chrono")]
mod chrono_impls {
    use std::{borrow::Cow, fmt::Display};

    use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};

    use super::{DateParts, SensitiveValue};

    fn parts_of(date: &impl Datelike) -> DateParts {
        DateParts::new(date.year(), date.month(), date.day())
    }

    impl SensitiveValue for NaiveDate {
        fn literal(&self) -> Cow<'_, str> {
            Cow::Owned(self.to_string())
        }

        fn date_parts(&self) -> Option<DateParts> {
            Some(parts_of(self))
        }
    }

    impl SensitiveValue for NaiveDateTime {
        fn literal(&self) -> Cow<'_, str> {
            Cow::Owned(self.to_string())
        }

        fn date_parts(&self) -> Option<DateParts> {
            Some(parts_of(self))
        }
    }

    impl<Tz> SensitiveValue for DateTime<Tz>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        fn literal(&self) -> Cow<'_, str> {
            Cow::Owned(self.to_string())
        }

        fn date_parts(&self) -> Option<DateParts> {
            Some(parts_of(self))
        }
    }
}
