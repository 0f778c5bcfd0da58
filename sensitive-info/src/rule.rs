//! Field rules: what kind of sensitive value a field holds and how much of it
//! may stay visible.
//!
//! A [`FieldRule`] is pure metadata. It is built once (usually by the
//! `Sensitive` derive, as a `const`) and never changes afterwards. The masking
//! itself lives in [`crate::mask`].

use std::fmt;

use thiserror::Error;

use crate::mask::date::DatePattern;

/// Trailing characters of free text left visible when a rule gives no visibility.
pub const DEFAULT_TEXT_VISIBILITY: usize = 0;

/// Trailing characters of an email local part left visible by default.
pub const DEFAULT_EMAIL_VISIBILITY: usize = 0;

/// Trailing digits of a number left visible by default.
pub const DEFAULT_NUMBER_VISIBILITY: usize = 0;

/// The semantic kind of a sensitive field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Calendar dates, either as text or as a date type.
    Date,
    /// Email addresses; the domain stays visible.
    Email,
    /// Free text.
    Text,
    /// Numeric identifiers (account numbers, card numbers, amounts).
    Number,
}

impl FieldKind {
    /// Visibility used when a rule does not set one.
    ///
    /// Dates have no visibility concept and report `0`.
    #[must_use]
    pub const fn default_visibility(self) -> usize {
        match self {
            FieldKind::Date => 0,
            FieldKind::Email => DEFAULT_EMAIL_VISIBILITY,
            FieldKind::Text => DEFAULT_TEXT_VISIBILITY,
            FieldKind::Number => DEFAULT_NUMBER_VISIBILITY,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::Date => "date",
            FieldKind::Email => "email",
            FieldKind::Text => "text",
            FieldKind::Number => "number",
        })
    }
}

/// How a single field is masked.
///
/// ```rust
/// use sensitive_info::{FieldKind, FieldRule};
///
/// const CARD: FieldRule = FieldRule::number().with_visibility(4);
///
/// assert_eq!(CARD.kind(), FieldKind::Number);
/// assert_eq!(CARD.effective_visibility(), 4);
/// assert_eq!(FieldRule::text().effective_visibility(), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldRule {
    kind: FieldKind,
    visibility: Option<usize>,
    pattern: Option<&'static str>,
}

impl FieldRule {
    /// A date rule: the value is replaced by [`crate::DATE_PLACEHOLDER`].
    #[must_use]
    pub const fn date() -> Self {
        Self::of(FieldKind::Date)
    }

    /// A date rule with a masking pattern.
    ///
    /// The pattern uses `d`, `M` and `y` runs for day, month and year. Any
    /// other character is copied as-is. Components wrapped in `[...]` stay
    /// visible, all others are masked digit by digit: `"dd/[MM]/yyyy"` turns
    /// `22/03/1990` into `**/03/****`.
    #[must_use]
    pub const fn date_with_pattern(pattern: &'static str) -> Self {
        Self {
            kind: FieldKind::Date,
            visibility: None,
            pattern: Some(pattern),
        }
    }

    /// An email rule: the local part is masked, `@domain` is kept.
    #[must_use]
    pub const fn email() -> Self {
        Self::of(FieldKind::Email)
    }

    /// A free-text rule.
    #[must_use]
    pub const fn text() -> Self {
        Self::of(FieldKind::Text)
    }

    /// A numeric rule.
    #[must_use]
    pub const fn number() -> Self {
        Self::of(FieldKind::Number)
    }

    /// A rule of `kind` with default visibility.
    #[must_use]
    pub const fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            visibility: None,
            pattern: None,
        }
    }

    /// Keeps the last `visibility` characters (or digits) visible.
    ///
    /// The masking engine never reveals a whole value: the visible tail is
    /// capped at one character less than the value's length.
    #[must_use]
    pub const fn with_visibility(self, visibility: usize) -> Self {
        Self {
            visibility: Some(visibility),
            ..self
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The visibility explicitly set on this rule, if any.
    #[must_use]
    pub const fn visibility(&self) -> Option<usize> {
        self.visibility
    }

    /// The visibility the engine will use: the explicit one or the kind default.
    #[must_use]
    pub const fn effective_visibility(&self) -> usize {
        match self.visibility {
            Some(visibility) => visibility,
            None => self.kind.default_visibility(),
        }
    }

    /// The date pattern, for date rules built with [`FieldRule::date_with_pattern`].
    #[must_use]
    pub const fn pattern(&self) -> Option<&'static str> {
        self.pattern
    }

    /// Checks that the rule is well formed.
    ///
    /// The derive performs the same checks at compile time; this is used for
    /// rules handed to the [`crate::Registry`] at startup.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.kind != FieldKind::Date {
            return Ok(());
        }
        if self.visibility.is_some() {
            return Err(RuleError::VisibilityOnDate);
        }
        if let Some(pattern) = self.pattern {
            DatePattern::parse(pattern)
                .map_err(|reason| RuleError::InvalidPattern { pattern, reason })?;
        }
        Ok(())
    }
}

/// A malformed [`FieldRule`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("date rules do not take a visibility")]
    VisibilityOnDate,
    #[error("invalid date pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_default_visibility() {
        assert_eq!(FieldRule::date().kind(), FieldKind::Date);
        assert_eq!(FieldRule::email().kind(), FieldKind::Email);
        assert_eq!(FieldRule::text().kind(), FieldKind::Text);
        assert_eq!(FieldRule::number().kind(), FieldKind::Number);
        assert_eq!(FieldRule::number().visibility(), None);
        assert_eq!(
            FieldRule::number().effective_visibility(),
            DEFAULT_NUMBER_VISIBILITY
        );
    }

    #[test]
    fn with_visibility_overrides_default() {
        let rule = FieldRule::text().with_visibility(3);
        assert_eq!(rule.visibility(), Some(3));
        assert_eq!(rule.effective_visibility(), 3);
    }

    #[test]
    fn rules_are_const_constructible() {
        const RULE: FieldRule = FieldRule::date_with_pattern("dd/[MM]/yyyy");
        assert_eq!(RULE.pattern(), Some("dd/[MM]/yyyy"));
        assert!(RULE.validate().is_ok());
    }

    #[test]
    fn validate_rejects_visibility_on_date() {
        let rule = FieldRule::date().with_visibility(2);
        assert_eq!(rule.validate(), Err(RuleError::VisibilityOnDate));
    }

    #[test]
    fn validate_rejects_malformed_pattern() {
        let rule = FieldRule::date_with_pattern("dd/[MM/yyyy");
        assert!(matches!(
            rule.validate(),
            Err(RuleError::InvalidPattern { .. })
        ));

        let rule = FieldRule::date_with_pattern("--/--");
        assert!(rule.validate().is_err());
    }

    #[test]
    fn rule_errors_are_copy() {
        let err = FieldRule::date_with_pattern("[dd]").validate().unwrap_err();
        let copied = err;
        assert_eq!(err, copied);
    }

    #[test]
    fn validate_rejects_pattern_revealing_every_component() {
        let rule = FieldRule::date_with_pattern("[dd/MM/yyyy]");
        assert_eq!(
            rule.validate(),
            Err(RuleError::InvalidPattern {
                pattern: "[dd/MM/yyyy]",
                reason: "pattern reveals every component",
            })
        );
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(FieldKind::Email.to_string(), "email");
        assert_eq!(FieldKind::Number.to_string(), "number");
    }
}
