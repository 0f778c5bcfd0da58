//! Date masking patterns.
//!
//! A pattern is a run-length description of a date layout: `d` for day, `M`
//! for month, `y` for year, anything else literal. Components inside `[...]`
//! are revealed; the rest are masked one character per digit. At least one
//! component must stay masked.
//!
//! Calendar values are formatted through the pattern. Textual dates are parsed
//! positionally against it; if the text does not fit the layout, the caller
//! falls back to [`DatePattern::masked_shape`].

use std::{iter::Peekable, str::Chars};

use super::{mask_run, MASK_CHAR};
use crate::value::DateParts;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unit {
    Day,
    Month,
    Year,
}

impl Unit {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            'd' => Some(Unit::Day),
            'M' => Some(Unit::Month),
            'y' => Some(Unit::Year),
            _ => None,
        }
    }

    fn format(self, parts: DateParts, width: usize) -> String {
        match self {
            Unit::Day => format!("{:0width$}", parts.day),
            Unit::Month => format!("{:0width$}", parts.month),
            Unit::Year if width == 2 => format!("{:02}", parts.year.rem_euclid(100)),
            Unit::Year => format!("{:0width$}", parts.year),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Segment {
    Component {
        unit: Unit,
        width: usize,
        reveal: bool,
    },
    Literal(char),
}

/// A parsed date masking pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DatePattern {
    segments: Vec<Segment>,
}

impl DatePattern {
    /// Parses `pattern`, returning a short reason on failure.
    pub(crate) fn parse(pattern: &str) -> Result<Self, &'static str> {
        let mut segments = Vec::new();
        let mut chars = pattern.chars().peekable();
        let mut group_start: Option<usize> = None;

        while let Some(ch) = chars.next() {
            match ch {
                '[' => {
                    if group_start.is_some() {
                        return Err("nested `[`");
                    }
                    group_start = Some(segments.len());
                }
                ']' => match group_start.take() {
                    None => return Err("unmatched `]`"),
                    Some(start) if start == segments.len() => {
                        return Err("empty `[]` group");
                    }
                    Some(_) => {}
                },
                _ => match Unit::from_char(ch) {
                    Some(unit) => {
                        let mut width = 1;
                        while chars.next_if_eq(&ch).is_some() {
                            width += 1;
                        }
                        segments.push(Segment::Component {
                            unit,
                            width,
                            reveal: group_start.is_some(),
                        });
                    }
                    None => segments.push(Segment::Literal(ch)),
                },
            }
        }

        if group_start.is_some() {
            return Err("unclosed `[`");
        }
        if !segments
            .iter()
            .any(|segment| matches!(segment, Segment::Component { .. }))
        {
            return Err("no date component (`d`, `M` or `y`)");
        }
        if !segments
            .iter()
            .any(|segment| matches!(segment, Segment::Component { reveal: false, .. }))
        {
            return Err("pattern reveals every component");
        }
        Ok(Self { segments })
    }

    /// Formats a calendar value through the pattern.
    pub(crate) fn apply_to_parts(&self, parts: DateParts) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match *segment {
                Segment::Component {
                    unit,
                    width,
                    reveal,
                } => push_component(&mut out, &unit.format(parts, width), reveal),
                Segment::Literal(ch) => out.push(ch),
            }
        }
        out
    }

    /// Masks a textual date laid out as the pattern describes.
    ///
    /// Returns `None` when the text does not match the layout.
    pub(crate) fn apply_to_text(&self, text: &str) -> Option<String> {
        let mut chars = text.chars().peekable();
        let mut out = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match *segment {
                Segment::Component { width, reveal, .. } => {
                    let adjacent = matches!(
                        self.segments.get(index + 1),
                        Some(Segment::Component { .. })
                    );
                    let digits = take_digits(&mut chars, adjacent.then_some(width))?;
                    push_component(&mut out, &digits, reveal);
                }
                Segment::Literal(expected) => {
                    chars.next_if_eq(&expected)?;
                    out.push(expected);
                }
            }
        }
        chars.next().is_none().then_some(out)
    }

    /// The layout with every component masked, e.g. `**/**/****`.
    pub(crate) fn masked_shape(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match *segment {
                Segment::Component { width, .. } => out.push_str(&mask_run(width)),
                Segment::Literal(ch) => out.push(ch),
            }
        }
        out
    }
}

fn push_component(out: &mut String, digits: &str, reveal: bool) {
    if reveal {
        out.push_str(digits);
    } else {
        out.extend(digits.chars().map(|_| MASK_CHAR));
    }
}

/// Takes exactly `exact` digits, or every leading digit when `exact` is `None`.
fn take_digits(chars: &mut Peekable<Chars<'_>>, exact: Option<usize>) -> Option<String> {
    let mut digits = String::new();
    while exact.map_or(true, |width| digits.len() < width) {
        match chars.next_if(char::is_ascii_digit) {
            Some(digit) => digits.push(digit),
            None => break,
        }
    }
    match exact {
        Some(width) if digits.len() != width => None,
        _ if digits.is_empty() => None,
        _ => Some(digits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(year: i32, month: u32, day: u32) -> DateParts {
        DateParts { year, month, day }
    }

    #[test]
    fn parse_rejects_malformed_patterns() {
        assert_eq!(DatePattern::parse("dd/[MM/yyyy"), Err("unclosed `[`"));
        assert_eq!(DatePattern::parse("dd/MM]/yyyy"), Err("unmatched `]`"));
        assert_eq!(DatePattern::parse("[dd[MM]]"), Err("nested `[`"));
        assert_eq!(DatePattern::parse("dd/[]/yyyy"), Err("empty `[]` group"));
        assert!(DatePattern::parse("--/--").is_err());
        assert!(DatePattern::parse("").is_err());
    }

    #[test]
    fn parse_rejects_fully_revealed_patterns() {
        for pattern in ["[dd/MM/yyyy]", "[dd]/[MM]/[yyyy]", "[yyyyMMdd]", "[d]"] {
            assert_eq!(
                DatePattern::parse(pattern),
                Err("pattern reveals every component"),
                "{pattern}"
            );
        }
        assert!(DatePattern::parse("[dd]/[MM]/yyyy").is_ok());
    }

    #[test]
    fn masked_shape_keeps_literals() {
        let pattern = DatePattern::parse("dd/[MM]/yyyy").unwrap();
        assert_eq!(pattern.masked_shape(), "**/**/****");
    }

    #[test]
    fn parts_are_formatted_and_masked() {
        let pattern = DatePattern::parse("dd/[MM]/yyyy").unwrap();
        assert_eq!(pattern.apply_to_parts(parts(1990, 3, 22)), "**/03/****");

        let pattern = DatePattern::parse("[yyyy]-MM-dd").unwrap();
        assert_eq!(pattern.apply_to_parts(parts(2024, 11, 5)), "2024-**-**");
    }

    #[test]
    fn two_digit_year_uses_last_two_digits() {
        let pattern = DatePattern::parse("d/M/[yy]").unwrap();
        assert_eq!(pattern.apply_to_parts(parts(1990, 3, 2)), "*/*/90");
    }

    #[test]
    fn text_is_parsed_positionally() {
        let pattern = DatePattern::parse("dd/[MM]/yyyy").unwrap();
        assert_eq!(
            pattern.apply_to_text("22/03/1990").as_deref(),
            Some("**/03/****")
        );
    }

    #[test]
    fn adjacent_components_take_exact_widths() {
        let pattern = DatePattern::parse("[yyyy]MMdd").unwrap();
        assert_eq!(
            pattern.apply_to_text("19900322").as_deref(),
            Some("1990****")
        );
        assert_eq!(pattern.apply_to_text("199003"), None);
    }

    #[test]
    fn mismatched_text_is_rejected() {
        let pattern = DatePattern::parse("dd/MM/yyyy").unwrap();
        assert_eq!(pattern.apply_to_text("1990-03-22"), None);
        assert_eq!(pattern.apply_to_text("22/03/1990 extra"), None);
        assert_eq!(pattern.apply_to_text("aa/bb/cccc"), None);
        assert_eq!(pattern.apply_to_text(""), None);
    }
}
