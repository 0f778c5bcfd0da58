//! The three shapes of the same record the benchmark renders.
//!
//! - [`Fields`]: no masking at all, plain `#[derive(Debug)]`.
//! - [`OverriddenFields`]: hand-written renderers calling the mask helpers.
//! - [`AnnotatedFields`]: field attributes, rendered by the derive.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use sensitive_info::{mask, Registry, RegistryError, Sensitive};

#[derive(Sensitive)]
pub(crate) struct AnnotatedFields {
    #[sensitive(date)]
    pub(crate) string_date: String,
    #[sensitive(date)]
    pub(crate) date: NaiveDate,
    #[sensitive(date, pattern = "dd/MM/yyyy")]
    pub(crate) date_with_pattern: NaiveDate,
    #[sensitive(email)]
    pub(crate) email: String,
    #[sensitive(text)]
    pub(crate) text: String,
    #[sensitive(text, visibility = 3)]
    pub(crate) text_with_more_visibility: String,
    #[sensitive(number)]
    pub(crate) number: i64,
    #[sensitive(number, visibility = 3)]
    pub(crate) number_with_more_visibility: i64,
    pub(crate) annotated_inner_class: AnnotatedInnerClass,
    pub(crate) not_annotated_inner_class: NotAnnotatedInnerClass,
}

#[derive(Sensitive)]
pub(crate) struct AnnotatedInnerClass {
    #[sensitive(text)]
    pub(crate) some_text: String,
    pub(crate) map: BTreeMap<String, String>,
    pub(crate) list: Vec<String>,
}

// Only read through `Debug`.
#[allow(dead_code)]
#[derive(Debug)]
pub(crate) struct NotAnnotatedInnerClass {
    pub(crate) text: String,
    pub(crate) date: NaiveDate,
    pub(crate) double: f64,
}

#[allow(dead_code)]
#[derive(Debug)]
pub(crate) struct Fields {
    pub(crate) string_date: String,
    pub(crate) date: NaiveDate,
    pub(crate) date_with_pattern: NaiveDate,
    pub(crate) email: String,
    pub(crate) text: String,
    pub(crate) text_with_more_visibility: String,
    pub(crate) number: i64,
    pub(crate) number_with_more_visibility: i64,
    pub(crate) annotated_inner_class: InnerClass,
    pub(crate) not_annotated_inner_class: InnerClass2,
}

#[allow(dead_code)]
#[derive(Debug)]
pub(crate) struct InnerClass {
    pub(crate) some_text: String,
    pub(crate) map: BTreeMap<String, String>,
    pub(crate) list: Vec<String>,
}

#[allow(dead_code)]
#[derive(Debug)]
pub(crate) struct InnerClass2 {
    pub(crate) text: String,
    pub(crate) date: NaiveDate,
    pub(crate) double: f64,
}

#[derive(Sensitive)]
#[sensitive(render_with = "render_overridden_fields")]
pub(crate) struct OverriddenFields {
    pub(crate) string_date: String,
    pub(crate) date: NaiveDate,
    pub(crate) date_with_pattern: NaiveDate,
    pub(crate) email: String,
    pub(crate) text: String,
    pub(crate) text_with_more_visibility: String,
    pub(crate) number: i64,
    pub(crate) number_with_more_visibility: i64,
    pub(crate) annotated_inner_class: OverriddenInnerClass,
    pub(crate) not_annotated_inner_class: InnerClass2,
}

/// Rendered by the hook installed in [`registry`].
#[derive(Sensitive)]
pub(crate) struct OverriddenInnerClass {
    pub(crate) some_text: String,
    pub(crate) map: BTreeMap<String, String>,
    pub(crate) list: Vec<String>,
}

fn render_overridden_fields(fields: &OverriddenFields, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("OverriddenFields")
        .field("string_date", &mask::date(&fields.string_date))
        .field("date", &mask::date(&fields.date))
        .field("date_with_pattern", &mask::date(&fields.date_with_pattern))
        .field("email", &mask::email(&fields.email))
        .field("text", &mask::text(&fields.text))
        .field(
            "text_with_more_visibility",
            &mask::text(&fields.text_with_more_visibility),
        )
        .field("number", &mask::number(&fields.number))
        .field(
            "number_with_more_visibility",
            &mask::number(&fields.number_with_more_visibility),
        )
        .field("annotated_inner_class", &fields.annotated_inner_class)
        .field("not_annotated_inner_class", &fields.not_annotated_inner_class)
        .finish()
}

fn render_overridden_inner(
    inner: &OverriddenInnerClass,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    f.debug_struct("OverriddenInnerClass")
        .field("some_text", &mask::text(&inner.some_text))
        .field("map", &inner.map)
        .field("list", &inner.list)
        .finish()
}

/// The registrations the demo installs at startup.
pub(crate) fn registry() -> Result<Registry, RegistryError> {
    Ok(Registry::builder()
        .render_with::<OverriddenInnerClass, _>(render_overridden_inner)?
        .build())
}

/// The record every scenario renders, in its three shapes.
pub(crate) struct Samples {
    pub(crate) plain: Fields,
    pub(crate) overridden: OverriddenFields,
    pub(crate) annotated: AnnotatedFields,
}

impl Samples {
    pub(crate) fn new(today: NaiveDate) -> Self {
        const STRING_DATE: &str = "22/03/1990";
        const EMAIL: &str = "mariano@test.com";
        const TEXT: &str = "some long text";
        const NUMBER: i64 = 1_023_812_094_710_923;
        const INNER_TEXT: &str = "some text within inner class";
        const OTHER_INNER_TEXT: &str = "not annotated inner class text";
        const DOUBLE: f64 = 30.0;

        Self {
            plain: Fields {
                string_date: STRING_DATE.into(),
                date: today,
                date_with_pattern: today,
                email: EMAIL.into(),
                text: TEXT.into(),
                text_with_more_visibility: TEXT.into(),
                number: NUMBER,
                number_with_more_visibility: NUMBER,
                annotated_inner_class: InnerClass {
                    some_text: INNER_TEXT.into(),
                    map: BTreeMap::new(),
                    list: Vec::new(),
                },
                not_annotated_inner_class: InnerClass2 {
                    text: OTHER_INNER_TEXT.into(),
                    date: today,
                    double: DOUBLE,
                },
            },
            overridden: OverriddenFields {
                string_date: STRING_DATE.into(),
                date: today,
                date_with_pattern: today,
                email: EMAIL.into(),
                text: TEXT.into(),
                text_with_more_visibility: TEXT.into(),
                number: NUMBER,
                number_with_more_visibility: NUMBER,
                annotated_inner_class: OverriddenInnerClass {
                    some_text: INNER_TEXT.into(),
                    map: BTreeMap::new(),
                    list: Vec::new(),
                },
                not_annotated_inner_class: InnerClass2 {
                    text: OTHER_INNER_TEXT.into(),
                    date: today,
                    double: DOUBLE,
                },
            },
            annotated: AnnotatedFields {
                string_date: STRING_DATE.into(),
                date: today,
                date_with_pattern: today,
                email: EMAIL.into(),
                text: TEXT.into(),
                text_with_more_visibility: TEXT.into(),
                number: NUMBER,
                number_with_more_visibility: NUMBER,
                annotated_inner_class: AnnotatedInnerClass {
                    some_text: INNER_TEXT.into(),
                    map: BTreeMap::new(),
                    list: Vec::new(),
                },
                not_annotated_inner_class: NotAnnotatedInnerClass {
                    text: OTHER_INNER_TEXT.into(),
                    date: today,
                    double: DOUBLE,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use sensitive_info::render;

    use super::*;

    fn samples() -> Samples {
        Samples::new(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
    }

    #[test]
    fn annotated_fields_are_masked() {
        let rendered = render(&samples().annotated);
        assert_eq!(
            rendered,
            concat!(
                r#"AnnotatedFields { string_date: "**/**/****", date: "**/**/****", "#,
                r#"date_with_pattern: "**/**/****", email: "***@test.com", text: "***", "#,
                r#"text_with_more_visibility: "***ext", number: "****************", "#,
                r#"number_with_more_visibility: "*************923", "#,
                r#"annotated_inner_class: AnnotatedInnerClass { some_text: "***", map: {}, list: [] }, "#,
                r#"not_annotated_inner_class: NotAnnotatedInnerClass { "#,
                r#"text: "not annotated inner class text", date: 2024-05-17, double: 30.0 } }"#
            )
        );
    }

    #[test]
    fn plain_fields_are_rendered_in_full() {
        let rendered = render(&samples().plain);
        assert!(rendered.contains(r#"email: "mariano@test.com""#));
        assert!(rendered.contains("number: 1023812094710923"));
    }

    struct InnerHook<'a>(&'a OverriddenInnerClass);

    impl fmt::Display for InnerHook<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            render_overridden_inner(self.0, f)
        }
    }

    #[test]
    fn overridden_fields_use_the_hand_written_renderer() {
        let rendered = render(&samples().overridden);
        assert!(rendered.starts_with(r#"OverriddenFields { string_date: "**/**/****""#));
        assert!(rendered.contains(r#"email: "***@test.com""#));
        assert!(rendered.contains(r#"number_with_more_visibility: "****************""#));
        assert!(!rendered.contains("mariano@test.com"));
    }

    #[test]
    fn overridden_inner_class_is_registered_with_its_renderer() {
        let registry = registry().unwrap();
        assert!(registry.is_registered::<OverriddenInnerClass>());
        assert_eq!(registry.len(), 1);

        let samples = samples();
        assert_eq!(
            InnerHook(&samples.overridden.annotated_inner_class).to_string(),
            r#"OverriddenInnerClass { some_text: "***", map: {}, list: [] }"#
        );
    }
}
