//! Type utilities for the derive macro.

use proc_macro2::Span;
use syn::Result;

use crate::rule::Kind;

/// Primitive families the derive can recognise syntactically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scalar {
    Numeric,
    Bool,
    Char,
}

/// Classifies a bare primitive type name like `i32`, `bool` or `f64`.
///
/// Returns `None` for qualified paths, generic types, references or type
/// aliases. The check is conservative: anything not recognised here is left to
/// the `SensitiveValue` bound, which reports its own error.
pub(crate) fn scalar_type(ty: &syn::Type) -> Option<Scalar> {
    let syn::Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() || path.path.leading_colon.is_some() || path.path.segments.len() != 1 {
        return None;
    }
    let segment = path.path.segments.first()?;
    if !segment.arguments.is_empty() {
        return None;
    }
    match segment.ident.to_string().as_str() {
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" | "f32" | "f64" => Some(Scalar::Numeric),
        "bool" => Some(Scalar::Bool),
        "char" => Some(Scalar::Char),
        _ => None,
    }
}

/// Rejects rules that can never make sense for the field's primitive type.
pub(crate) fn check_rule_for_type(kind: Kind, ty: &syn::Type, span: Span) -> Result<()> {
    match (scalar_type(ty), kind) {
        (Some(Scalar::Bool | Scalar::Char), _) => Err(syn::Error::new(
            span,
            "bool and char fields cannot be masked: they carry no sensitive payload",
        )),
        (Some(Scalar::Numeric), Kind::Email | Kind::Date) => Err(syn::Error::new(
            span,
            format!(
                "numeric fields cannot use `{}`; use `number` (or `text`)",
                kind.as_str()
            ),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn parse_type(tokens: proc_macro2::TokenStream) -> syn::Type {
        syn::parse2(tokens).expect("should parse as Type")
    }

    #[test]
    fn numeric_primitives_detected() {
        assert_eq!(scalar_type(&parse_type(quote! { i32 })), Some(Scalar::Numeric));
        assert_eq!(scalar_type(&parse_type(quote! { f64 })), Some(Scalar::Numeric));
    }

    #[test]
    fn bool_and_char_detected() {
        assert_eq!(scalar_type(&parse_type(quote! { bool })), Some(Scalar::Bool));
        assert_eq!(scalar_type(&parse_type(quote! { char })), Some(Scalar::Char));
    }

    #[test]
    fn string_is_not_scalar() {
        assert_eq!(scalar_type(&parse_type(quote! { String })), None);
    }

    #[test]
    fn option_is_not_scalar() {
        assert_eq!(scalar_type(&parse_type(quote! { Option<i32> })), None);
    }

    #[test]
    fn qualified_path_is_not_scalar() {
        assert_eq!(scalar_type(&parse_type(quote! { std::primitive::i32 })), None);
        assert_eq!(scalar_type(&parse_type(quote! { ::std::primitive::i32 })), None);
    }

    #[test]
    fn email_on_number_is_rejected() {
        let ty = parse_type(quote! { u64 });
        assert!(check_rule_for_type(Kind::Email, &ty, Span::call_site()).is_err());
        assert!(check_rule_for_type(Kind::Date, &ty, Span::call_site()).is_err());
        assert!(check_rule_for_type(Kind::Number, &ty, Span::call_site()).is_ok());
        assert!(check_rule_for_type(Kind::Text, &ty, Span::call_site()).is_ok());
    }

    #[test]
    fn any_rule_on_bool_is_rejected() {
        let ty = parse_type(quote! { bool });
        assert!(check_rule_for_type(Kind::Number, &ty, Span::call_site()).is_err());
        assert!(check_rule_for_type(Kind::Text, &ty, Span::call_site()).is_err());
    }

    #[test]
    fn string_accepts_every_kind() {
        let ty = parse_type(quote! { String });
        for kind in [Kind::Date, Kind::Email, Kind::Text, Kind::Number] {
            assert!(check_rule_for_type(kind, &ty, Span::call_site()).is_ok());
        }
    }
}
