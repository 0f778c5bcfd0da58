//! Enum-specific `SensitiveType` derivation.
//!
//! This module generates a match arm per variant. Schema entries are keyed
//! `Variant.field` and numbered across all variants, so each arm addresses
//! its fields by their global index.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{ext::IdentExt, DataEnum, Fields, Ident, Result, Variant};

use crate::{
    field::{field_name, generate_field, DeriveContext},
    rule::reject_variant_attrs,
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) render_body: TokenStream,
    pub(crate) schema_fields: Vec<TokenStream>,
    pub(crate) first_rule: Option<Span>,
    pub(crate) debug_generics: Vec<Ident>,
    pub(crate) value_generics: Vec<Ident>,
}

pub(crate) fn derive_enum(
    data: &DataEnum,
    generics: &syn::Generics,
    root: &TokenStream,
) -> Result<EnumDeriveOutput> {
    let mut ctx = DeriveContext::new(generics, root);
    let mut arms = Vec::new();

    for variant in &data.variants {
        reject_variant_attrs(&variant.attrs)?;
        arms.push(derive_variant(&mut ctx, variant)?);
    }

    // `match *self {}` is the only exhaustive match on an empty enum.
    let render_body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms),*
            }
        }
    };

    Ok(EnumDeriveOutput {
        render_body,
        schema_fields: ctx.schema_fields,
        first_rule: ctx.first_rule,
        debug_generics: ctx.debug_generics,
        value_generics: ctx.value_generics,
    })
}

fn derive_variant(ctx: &mut DeriveContext<'_>, variant: &Variant) -> Result<TokenStream> {
    let variant_ident = &variant.ident;
    let variant_name = variant_ident.unraw().to_string();

    match &variant.fields {
        Fields::Unit => Ok(quote! {
            Self::#variant_ident => __fields.unit(#variant_name)
        }),
        Fields::Named(fields) => {
            let builder = format_ident!("__named");
            let mut members = Vec::new();
            let mut bindings = Vec::new();
            let mut statements = Vec::new();
            for (index, field) in fields.named.iter().enumerate() {
                let Some(member) = &field.ident else {
                    continue;
                };
                let binding = format_ident!("__binding_{index}");
                let key = field_name(field, index);
                statements.push(generate_field(
                    ctx,
                    Some(variant_ident),
                    field,
                    &key,
                    &binding,
                    &builder,
                )?);
                members.push(member);
                bindings.push(binding);
            }
            Ok(quote! {
                Self::#variant_ident { #(#members: #bindings),* } => {
                    let mut #builder = __fields.named(#variant_name);
                    #(#statements)*
                    #builder.finish()
                }
            })
        }
        Fields::Unnamed(fields) => {
            let builder = format_ident!("__tuple");
            let mut bindings = Vec::new();
            let mut statements = Vec::new();
            for (index, field) in fields.unnamed.iter().enumerate() {
                let binding = format_ident!("__binding_{index}");
                let key = field_name(field, index);
                statements.push(generate_field(
                    ctx,
                    Some(variant_ident),
                    field,
                    &key,
                    &binding,
                    &builder,
                )?);
                bindings.push(binding);
            }
            Ok(quote! {
                Self::#variant_ident ( #(#bindings),* ) => {
                    let mut #builder = __fields.tuple(#variant_name);
                    #(#statements)*
                    #builder.finish()
                }
            })
        }
    }
}
