//! The masking engine.
//!
//! Every function here is a pure string transformation: no traversal, no
//! state, no I/O. They are total (malformed or empty input yields a fully
//! masked placeholder) and deterministic.
//!
//! ## Policy
//!
//! | kind | output |
//! |------|--------|
//! | date | [`DATE_PLACEHOLDER`], or the value laid out by the rule's pattern |
//! | email | [`PLACEHOLDER`] plus the visible tail of the local part, then `@domain` |
//! | text | [`PLACEHOLDER`] plus the visible tail |
//! | number | each hidden digit replaced by [`MASK_CHAR`]; length preserved |
//!
//! Text and email masks have a fixed-length prefix so the output does not
//! reveal how long the value was. Numbers keep their length. The visible tail
//! is capped at `len - 1`, so a value is never shown in full.
//!
//! These functions are also the building blocks for hand-written renderers:
//!
//! ```rust
//! use sensitive_info::mask;
//!
//! assert_eq!(mask::email("mariano@test.com"), "***@test.com");
//! assert_eq!(mask::text("some long text"), "***");
//! assert_eq!(mask::date("22/03/1990"), "**/**/****");
//! assert_eq!(mask::number(&1023812094710923_u64), "****************");
//! ```

pub(crate) mod date;

use std::iter;

use self::date::DatePattern;
use crate::{
    rule::{FieldKind, FieldRule},
    value::SensitiveValue,
};

/// Character used for each masked character or digit.
pub const MASK_CHAR: char = '*';

/// Fixed-length mask used for text, email local parts and unparseable values.
pub const PLACEHOLDER: &str = "***";

/// Replacement for dates without a masking pattern.
pub const DATE_PLACEHOLDER: &str = "**/**/****";

/// Masks `value` according to `rule`.
#[must_use]
pub fn apply<V>(value: &V, rule: &FieldRule) -> String
where
    V: SensitiveValue + ?Sized,
{
    let visibility = rule.effective_visibility();
    match rule.kind() {
        FieldKind::Date => match rule.pattern() {
            Some(pattern) => mask_date_with_pattern(value, pattern),
            None => DATE_PLACEHOLDER.to_string(),
        },
        FieldKind::Email => mask_email(&value.literal(), visibility),
        FieldKind::Text => mask_text(&value.literal(), visibility),
        FieldKind::Number => mask_number(&value.literal(), visibility),
    }
}

/// The fully masked output for `kind`, used when a value cannot be read.
#[must_use]
pub fn placeholder(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Date => DATE_PLACEHOLDER,
        FieldKind::Email | FieldKind::Text | FieldKind::Number => PLACEHOLDER,
    }
}

/// Masks a date with the default rule.
#[must_use]
pub fn date<V: SensitiveValue + ?Sized>(value: &V) -> String {
    apply(value, &FieldRule::date())
}

/// Masks a date through `pattern` (see [`FieldRule::date_with_pattern`]).
///
/// A malformed pattern, or one that reveals every component, yields
/// [`DATE_PLACEHOLDER`].
#[must_use]
pub fn date_with_pattern<V: SensitiveValue + ?Sized>(value: &V, pattern: &str) -> String {
    mask_date_with_pattern(value, pattern)
}

/// Masks an email address with the default rule.
#[must_use]
pub fn email<V: SensitiveValue + ?Sized>(value: &V) -> String {
    apply(value, &FieldRule::email())
}

/// Masks free text with the default rule.
#[must_use]
pub fn text<V: SensitiveValue + ?Sized>(value: &V) -> String {
    apply(value, &FieldRule::text())
}

/// Masks a number with the default rule.
#[must_use]
pub fn number<V: SensitiveValue + ?Sized>(value: &V) -> String {
    apply(value, &FieldRule::number())
}

fn mask_date_with_pattern<V: SensitiveValue + ?Sized>(value: &V, pattern: &str) -> String {
    let Ok(pattern) = DatePattern::parse(pattern) else {
        return DATE_PLACEHOLDER.to_string();
    };
    if let Some(parts) = value.date_parts() {
        return pattern.apply_to_parts(parts);
    }
    pattern
        .apply_to_text(value.literal().trim())
        .unwrap_or_else(|| pattern.masked_shape())
}

fn mask_email(value: &str, visibility: usize) -> String {
    let value = value.trim();
    match value.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let mut out = mask_text(local, visibility);
            out.push('@');
            out.push_str(domain);
            out
        }
        _ => PLACEHOLDER.to_string(),
    }
}

fn mask_text(value: &str, visibility: usize) -> String {
    let total = value.chars().count();
    let visible = capped(visibility, total);
    let mut out = String::from(PLACEHOLDER);
    out.extend(value.chars().skip(total - visible));
    out
}

fn mask_number(value: &str, visibility: usize) -> String {
    let value = value.trim();
    if !is_plain_number(value) {
        return PLACEHOLDER.to_string();
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let hidden = digits - capped(visibility, digits);
    let mut seen = 0;
    value
        .chars()
        .map(|ch| {
            if !ch.is_ascii_digit() {
                return ch;
            }
            seen += 1;
            if seen <= hidden {
                MASK_CHAR
            } else {
                ch
            }
        })
        .collect()
}

/// Visible tail length: never the whole value.
fn capped(visibility: usize, total: usize) -> usize {
    visibility.min(total.saturating_sub(1))
}

/// `[+-]digits[.digits]`
fn is_plain_number(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit());
    all_digits(integer) && fraction.map_or(true, all_digits)
}

/// A run of `len` mask characters.
pub(crate) fn mask_run(len: usize) -> String {
    iter::repeat(MASK_CHAR).take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_keeps_domain() {
        assert_eq!(email("mariano@test.com"), "***@test.com");
    }

    #[test]
    fn email_visibility_reveals_tail_of_local_part() {
        let rule = FieldRule::email().with_visibility(2);
        assert_eq!(apply("mariano@test.com", &rule), "***no@test.com");
    }

    #[test]
    fn email_without_domain_is_fully_masked() {
        assert_eq!(email("mariano"), PLACEHOLDER);
        assert_eq!(email("@test.com"), PLACEHOLDER);
        assert_eq!(email("mariano@"), PLACEHOLDER);
        assert_eq!(email(""), PLACEHOLDER);
    }

    #[test]
    fn email_uses_last_at_sign_as_domain_boundary() {
        assert_eq!(email("\"a@b\"@example.org"), "***@example.org");
    }

    #[test]
    fn text_with_visibility_reveals_tail() {
        let rule = FieldRule::text().with_visibility(3);
        assert_eq!(apply("some long text", &rule), "***ext");
    }

    #[test]
    fn text_mask_is_fixed_length() {
        assert_eq!(text("a"), text("a much longer secret value"));
    }

    #[test]
    fn visibility_never_reveals_whole_value() {
        let rule = FieldRule::text().with_visibility(10);
        assert_eq!(apply("abc", &rule), "***bc");

        let rule = FieldRule::number().with_visibility(10);
        assert_eq!(apply("123", &rule), "*23");
    }

    #[test]
    fn number_with_visibility_preserves_length() {
        let rule = FieldRule::number().with_visibility(3);
        let masked = apply(&1_023_812_094_710_923_u64, &rule);
        assert_eq!(masked, "*************923");
        assert_eq!(masked.len(), "1023812094710923".len());
    }

    #[test]
    fn number_keeps_sign_and_decimal_point() {
        let rule = FieldRule::number().with_visibility(1);
        assert_eq!(apply(&-1234_i32, &rule), "-***4");
        assert_eq!(apply(&30.5_f64, &rule), "**.5");
    }

    #[test]
    fn unparseable_number_is_fully_masked() {
        assert_eq!(number("12-34"), PLACEHOLDER);
        assert_eq!(number(""), PLACEHOLDER);
        assert_eq!(number("1."), PLACEHOLDER);
        assert_eq!(number(&f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn date_without_pattern_is_constant() {
        assert_eq!(date("22/03/1990"), DATE_PLACEHOLDER);
        assert_eq!(date(""), DATE_PLACEHOLDER);
        assert_eq!(date("not a date"), DATE_PLACEHOLDER);
    }

    #[test]
    fn date_pattern_reveals_bracketed_components() {
        assert_eq!(date_with_pattern("22/03/1990", "dd/[MM]/yyyy"), "**/03/****");
    }

    #[test]
    fn date_pattern_mismatch_yields_masked_shape() {
        assert_eq!(date_with_pattern("1990-03-22", "dd/[MM]/yyyy"), "**/**/****");
        assert_eq!(date_with_pattern("22/03/1990", "dd/[MM/yyyy"), DATE_PLACEHOLDER);
    }

    #[test]
    fn fully_revealed_date_pattern_yields_placeholder() {
        assert_eq!(date_with_pattern("22/03/1990", "[dd/MM/yyyy]"), DATE_PLACEHOLDER);
        assert_eq!(date_with_pattern("22/03/1990", "[dd]/[MM]/[yyyy]"), DATE_PLACEHOLDER);
        assert_eq!(
            apply("22/03/1990", &FieldRule::date_with_pattern("[dd/MM/yyyy]")),
            DATE_PLACEHOLDER
        );
    }

    #[test]
    fn empty_values_map_to_placeholders() {
        assert_eq!(text(""), PLACEHOLDER);
        assert_eq!(apply("", &FieldRule::text().with_visibility(3)), PLACEHOLDER);
    }

    #[test]
    fn masking_is_deterministic() {
        let rule = FieldRule::number().with_visibility(2);
        assert_eq!(apply("987654", &rule), apply("987654", &rule));
    }

    #[test]
    fn placeholder_depends_on_kind() {
        assert_eq!(placeholder(FieldKind::Date), DATE_PLACEHOLDER);
        assert_eq!(placeholder(FieldKind::Email), PLACEHOLDER);
    }

    #[test]
    fn mask_run_repeats_mask_char() {
        assert_eq!(mask_run(3), "***");
        assert_eq!(mask_run(0), "");
    }
}
