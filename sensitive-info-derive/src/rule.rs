//! Parsing of `#[sensitive(...)]` field attributes.
//!
//! This module maps attribute syntax to masking rules and produces structured
//! errors for invalid forms. Everything the runtime would reject when a rule
//! is registered is rejected here at compile time instead.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{meta::ParseNestedMeta, spanned::Spanned, Attribute, LitInt, LitStr, Meta, Result};

/// The masking kind named in a field attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Date,
    Email,
    Text,
    Number,
}

impl Kind {
    fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "date" => Some(Kind::Date),
            "email" => Some(Kind::Email),
            "text" => Some(Kind::Text),
            "number" => Some(Kind::Number),
            _ => None,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Kind::Date => "date",
            Kind::Email => "email",
            Kind::Text => "text",
            Kind::Number => "number",
        }
    }
}

/// A parsed field rule.
///
/// ## Attribute Mapping
///
/// | Attribute | Rule |
/// |-----------|------|
/// | None | no rule, the field renders through its own `Debug` |
/// | `#[sensitive(date)]` | `FieldRule::date()` |
/// | `#[sensitive(date, pattern = "dd/[MM]/yyyy")]` | `FieldRule::date_with_pattern(..)` |
/// | `#[sensitive(email)]` | `FieldRule::email()` |
/// | `#[sensitive(text, visibility = 3)]` | `FieldRule::text().with_visibility(3)` |
/// | `#[sensitive(number, visibility = 4)]` | `FieldRule::number().with_visibility(4)` |
#[derive(Clone, Debug)]
pub(crate) struct RuleSpec {
    pub(crate) kind: Kind,
    pub(crate) visibility: Option<usize>,
    pub(crate) pattern: Option<LitStr>,
    pub(crate) span: Span,
}

impl RuleSpec {
    /// Tokens building the equivalent `FieldRule` in a const context.
    pub(crate) fn to_tokens(&self, root: &TokenStream) -> TokenStream {
        let base = match (self.kind, &self.pattern) {
            (Kind::Date, Some(pattern)) => quote! { #root::FieldRule::date_with_pattern(#pattern) },
            (Kind::Date, None) => quote! { #root::FieldRule::date() },
            (Kind::Email, _) => quote! { #root::FieldRule::email() },
            (Kind::Text, _) => quote! { #root::FieldRule::text() },
            (Kind::Number, _) => quote! { #root::FieldRule::number() },
        };
        match self.visibility {
            Some(visibility) => quote! { #base.with_visibility(#visibility) },
            None => base,
        }
    }
}

#[derive(Default)]
struct RuleBuilder {
    kind: Option<Kind>,
    visibility: Option<(usize, Span)>,
    pattern: Option<LitStr>,
}

impl RuleBuilder {
    fn option(&mut self, meta: &ParseNestedMeta<'_>) -> Result<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected a masking kind or option"));
        };
        let name = ident.to_string();

        if let Some(kind) = Kind::from_ident(&name) {
            if let Some(previous) = self.kind {
                return Err(meta.error(format!(
                    "multiple masking kinds specified (`{}` and `{name}`)",
                    previous.as_str()
                )));
            }
            self.kind = Some(kind);
            return Ok(());
        }

        match name.as_str() {
            "visibility" => {
                if self.visibility.is_some() {
                    return Err(meta.error("duplicate `visibility` option"));
                }
                let lit: LitInt = meta.value()?.parse()?;
                self.visibility = Some((lit.base10_parse()?, lit.span()));
                Ok(())
            }
            "pattern" => {
                if self.pattern.is_some() {
                    return Err(meta.error("duplicate `pattern` option"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                if let Err(reason) = validate_date_pattern(&lit.value()) {
                    return Err(syn::Error::new(
                        lit.span(),
                        format!("invalid date pattern: {reason}"),
                    ));
                }
                self.pattern = Some(lit);
                Ok(())
            }
            _ => Err(meta.error(format!(
                "unknown option `{name}`; expected one of `date`, `email`, `text`, `number`, \
`visibility`, `pattern`"
            ))),
        }
    }

    fn finish(self, span: Span) -> Result<RuleSpec> {
        let Some(kind) = self.kind else {
            return Err(syn::Error::new(
                span,
                "missing masking kind: expected one of `date`, `email`, `text`, `number`",
            ));
        };
        if kind == Kind::Date {
            if let Some((_, visibility_span)) = self.visibility {
                return Err(syn::Error::new(
                    visibility_span,
                    "`visibility` is not supported on `date`; use `pattern` to reveal components",
                ));
            }
        } else if let Some(pattern) = &self.pattern {
            return Err(syn::Error::new(
                pattern.span(),
                format!("`pattern` is only supported on `date`, not `{}`", kind.as_str()),
            ));
        }
        Ok(RuleSpec {
            kind,
            visibility: self.visibility.map(|(visibility, _)| visibility),
            pattern: self.pattern,
            span,
        })
    }
}

/// Parses the rule declared on a field, if any.
pub(crate) fn parse_field_rule(attrs: &[Attribute]) -> Result<Option<RuleSpec>> {
    let mut rule: Option<RuleSpec> = None;
    for attr in attrs {
        if !attr.path().is_ident("sensitive") {
            continue;
        }
        if rule.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "multiple #[sensitive] attributes specified on the same field",
            ));
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected a masking kind (e.g., #[sensitive(email)])",
                ));
            }
            Meta::List(list) => {
                let mut builder = RuleBuilder::default();
                list.parse_nested_meta(|meta| builder.option(&meta))?;
                rule = Some(builder.finish(attr.span())?);
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[sensitive]",
                ));
            }
        }
    }
    Ok(rule)
}

/// Rejects `#[sensitive]` on enum variants.
pub(crate) fn reject_variant_attrs(attrs: &[Attribute]) -> Result<()> {
    match attrs.iter().find(|attr| attr.path().is_ident("sensitive")) {
        Some(attr) => Err(syn::Error::new(
            attr.span(),
            "#[sensitive] is not supported on enum variants; annotate the variant's fields",
        )),
        None => Ok(()),
    }
}

/// Grammar check for date patterns; mirrors the runtime parser.
fn validate_date_pattern(pattern: &str) -> std::result::Result<(), &'static str> {
    let mut in_group = false;
    let mut group_is_empty = false;
    let mut has_component = false;
    let mut has_masked = false;
    for ch in pattern.chars() {
        match ch {
            '[' if in_group => return Err("nested `[`"),
            '[' => {
                in_group = true;
                group_is_empty = true;
            }
            ']' if !in_group => return Err("unmatched `]`"),
            ']' if group_is_empty => return Err("empty `[]` group"),
            ']' => in_group = false,
            'd' | 'M' | 'y' => {
                has_component = true;
                has_masked |= !in_group;
                group_is_empty = false;
            }
            _ => group_is_empty = false,
        }
    }
    if in_group {
        return Err("unclosed `[`");
    }
    if !has_component {
        return Err("no date component (`d`, `M` or `y`)");
    }
    if !has_masked {
        return Err("pattern reveals every component");
    }
    Ok(())
}
