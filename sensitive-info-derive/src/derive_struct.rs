//! Struct-specific `SensitiveType` derivation.
//!
//! This module generates the field walk for struct fields and collects the
//! schema entries and generic parameters that require trait bounds.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{ext::IdentExt, DataStruct, Fields, Ident, Result};

use crate::field::{field_name, generate_field, DeriveContext};

pub(crate) struct StructDeriveOutput {
    pub(crate) render_body: TokenStream,
    pub(crate) schema_fields: Vec<TokenStream>,
    pub(crate) first_rule: Option<Span>,
    pub(crate) debug_generics: Vec<Ident>,
    pub(crate) value_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: &DataStruct,
    generics: &syn::Generics,
    root: &TokenStream,
) -> Result<StructDeriveOutput> {
    let mut ctx = DeriveContext::new(generics, root);
    let type_name = name.unraw().to_string();

    let render_body = match &data.fields {
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
                statements.push(generate_field(&mut ctx, None, field, &key, &binding, &builder)?);
                members.push(member);
                bindings.push(binding);
            }
            quote! {
                match self {
                    Self { #(#members: #bindings),* } => {
                        let mut #builder = __fields.named(#type_name);
                        #(#statements)*
                        #builder.finish()
                    }
                }
            }
        }
        Fields::Unnamed(fields) => {
            let builder = format_ident!("__tuple");
            let mut bindings = Vec::new();
            let mut statements = Vec::new();
            for (index, field) in fields.unnamed.iter().enumerate() {
                let binding = format_ident!("__binding_{index}");
                let key = field_name(field, index);
                statements.push(generate_field(&mut ctx, None, field, &key, &binding, &builder)?);
                bindings.push(binding);
            }
            quote! {
                match self {
                    Self ( #(#bindings),* ) => {
                        let mut #builder = __fields.tuple(#type_name);
                        #(#statements)*
                        #builder.finish()
                    }
                }
            }
        }
        Fields::Unit => quote! {
            __fields.unit(#type_name)
        },
    };

    Ok(StructDeriveOutput {
        render_body,
        schema_fields: ctx.schema_fields,
        first_rule: ctx.first_rule,
        debug_generics: ctx.debug_generics,
        value_generics: ctx.value_generics,
    })
}
