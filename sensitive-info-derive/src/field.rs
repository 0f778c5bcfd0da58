//! Shared field handling for struct and enum derivation.
//!
//! Every field contributes two things to the expansion: a `FieldSchema` entry
//! in the type's const schema, and a rendering call in `render_fields`. Both
//! are produced here so that their indices always agree.

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, Field, Result};

use crate::{
    generics::collect_generics_from_type, rule::parse_field_rule, types::check_rule_for_type,
};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) root: &'a TokenStream,
    /// `FieldSchema` constructors, in declaration order.
    pub(crate) schema_fields: Vec<TokenStream>,
    /// Span of the first field that declares a rule.
    pub(crate) first_rule: Option<proc_macro2::Span>,
    pub(crate) debug_generics: Vec<Ident>,
    pub(crate) value_generics: Vec<Ident>,
}

impl<'a> DeriveContext<'a> {
    pub(crate) fn new(generics: &'a syn::Generics, root: &'a TokenStream) -> Self {
        Self {
            generics,
            root,
            schema_fields: Vec::new(),
            first_rule: None,
            debug_generics: Vec::new(),
            value_generics: Vec::new(),
        }
    }
}

/// Name under which a field appears in the schema and in rendered output.
pub(crate) fn field_name(field: &Field, index: usize) -> String {
    field
        .ident
        .as_ref()
        .map_or_else(|| index.to_string(), |ident| ident.unraw().to_string())
}

/// Registers `field` in the schema and returns its rendering statement.
///
/// `builder` is the `NamedFields`/`TupleFields` local the statement writes to.
///
/// ## Field Rendering
///
/// | Annotation | Behavior |
/// |------------|----------|
/// | None | `Debug` of the field; registry rules apply to `SensitiveValue` leaves |
/// | `#[sensitive(kind, ..)]` | masked with the declared rule |
pub(crate) fn generate_field(
    ctx: &mut DeriveContext<'_>,
    variant: Option<&Ident>,
    field: &Field,
    name: &str,
    binding: &Ident,
    builder: &Ident,
) -> Result<TokenStream> {
    let root = ctx.root;
    let ty = &field.ty;
    let index = ctx.schema_fields.len();
    let rule = parse_field_rule(&field.attrs)?;

    let rule_tokens = match &rule {
        Some(rule) => {
            check_rule_for_type(rule.kind, ty, rule.span)?;
            ctx.first_rule = ctx.first_rule.or(Some(rule.span));
            let tokens = rule.to_tokens(root);
            quote! { ::core::option::Option::Some(#tokens) }
        }
        None => quote! { ::core::option::Option::None },
    };
    ctx.schema_fields.push(match variant {
        Some(variant) => {
            let variant = variant.unraw().to_string();
            quote! { #root::FieldSchema::variant_field(#variant, #name, #rule_tokens) }
        }
        None => quote! { #root::FieldSchema::new(#name, #rule_tokens) },
    });

    let value = if rule.is_some() {
        collect_generics_from_type(ty, ctx.generics, &mut ctx.value_generics);
        // Spanned at the type so a missing `SensitiveValue` impl points there.
        quote_spanned! { ty.span() =>
            #root::FieldValue::sensitive(#binding)
        }
    } else {
        collect_generics_from_type(ty, ctx.generics, &mut ctx.debug_generics);
        quote_spanned! { ty.span() =>
            (&#root::__private::Probe(#binding)).field_value()
        }
    };

    Ok(quote! {
        #builder.field(#index, #value);
    })
}
