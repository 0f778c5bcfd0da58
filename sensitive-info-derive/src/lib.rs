//! Derive macros for `sensitive-info`.
//!
//! This crate generates the code behind `#[derive(Sensitive)]`. It:
//! - reads `#[sensitive(...)]` field and container attributes
//! - validates rules against field types where the type is visible
//! - emits a `const` sensitivity schema and a `SensitiveType` impl
//! - emits `Debug`/`Display` impls that render through the masking runtime
//!
//! It does **not** mask anything itself. Masking lives in the main
//! `sensitive-info` crate and happens at formatting time.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

#[cfg(feature = "slog")]
use proc_macro2::Span;
use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote, quote_spanned};
use syn::{ext::IdentExt, parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod field;
mod generics;
mod rule;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_debug_bounds, add_sensitive_value_bounds};

/// Derives `sensitive_info::SensitiveType`, `Debug` and `Display` for structs and enums.
///
/// # Field Attributes
///
/// - **No annotation**: the field renders through its own `Debug`. Nested
///   types deriving `Sensitive` mask themselves. A registered rule can still
///   mask the field at runtime when its type is a `SensitiveValue`.
///
/// - `#[sensitive(date)]`, `#[sensitive(date, pattern = "dd/[MM]/yyyy")]`:
///   masks a date. The bracketed groups of the pattern stay visible.
///
/// - `#[sensitive(email)]`, `#[sensitive(text)]`, `#[sensitive(number)]`, each
///   with an optional `visibility = N`: masks all but the last `N` characters.
///
/// Rules on `bool` or `char` fields, and `email`/`date` rules on numeric
/// fields, are compile errors. Fields of any other type must implement
/// `SensitiveValue` to carry a rule.
///
/// # Container Attributes
///
/// - `#[sensitive(render_with = "path::to::fn")]`: replaces the field walk with
///   `fn(&Self, &mut fmt::Formatter<'_>) -> fmt::Result`. Cannot be combined
///   with field rules.
/// - `#[sensitive(skip_display)]`: do not generate `Display`.
///
/// Unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `Debug` and `Display`: both produce the masked rendering. Do not also
///   `#[derive(Debug)]` on the type.
/// - `slog::Value` (behind `cfg(feature = "slog")`): emits the masked rendering
///   as the record value. The derive first looks for a top-level `slog` crate;
///   if not found, it checks the `SENSITIVE_INFO_SLOG_CRATE` env var for an
///   alternate path (e.g., `my_log::slog`). If neither is available, it uses
///   the copy re-exported by `sensitive_info`, so crates that never touch
///   `slog` still compile when the feature is unified on.
#[proc_macro_derive(Sensitive, attributes(sensitive))]
pub fn derive_sensitive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the sensitive-info crate root.
///
/// Handles crate renaming (e.g., `masking = { package = "sensitive-info", ... }`).
/// Inside the crate itself the path still resolves through its
/// `extern crate self as sensitive_info`.
fn crate_root() -> TokenStream {
    match crate_name("sensitive-info") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::sensitive_info },
    }
}

/// Returns the token stream to reference the slog crate root.
///
/// Handles crate renaming (e.g., `my_slog = { package = "slog", ... }`).
/// If the top-level `slog` crate is not available, falls back to the
/// `SENSITIVE_INFO_SLOG_CRATE` env var, which should be a path like `my_log::slog`,
/// and then to `sensitive_info::__private::slog`.
#[cfg(feature = "slog")]
fn slog_crate() -> Result<TokenStream> {
    match crate_name("slog") {
        Ok(FoundCrate::Itself) => Ok(quote! { crate }),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            Ok(quote! { ::#ident })
        }
        Err(_) => {
            let Ok(env_value) = std::env::var("SENSITIVE_INFO_SLOG_CRATE") else {
                let root = crate_root();
                return Ok(quote! { #root::__private::slog });
            };
            let path = syn::parse_str::<syn::Path>(&env_value).map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    format!(
                        "SENSITIVE_INFO_SLOG_CRATE must be a valid Rust path (got `{env_value}`)"
                    ),
                )
            })?;
            Ok(quote! { #path })
        }
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item = format_ident!("{}", item);
    quote! { #root::#item }
}

struct DeriveOutput {
    render_body: TokenStream,
    schema_fields: Vec<TokenStream>,
    first_rule: Option<proc_macro2::Span>,
    debug_generics: Vec<proc_macro2::Ident>,
    value_generics: Vec<proc_macro2::Ident>,
}

#[allow(clippy::too_many_lines)]
fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions {
        skip_display,
        render_with,
    } = parse_container_options(&attrs)?;

    let root = crate_root();

    let derive_output = match &data {
        Data::Struct(data) => {
            let output = derive_struct(&ident, data, &generics, &root)?;
            DeriveOutput {
                render_body: output.render_body,
                schema_fields: output.schema_fields,
                first_rule: output.first_rule,
                debug_generics: output.debug_generics,
                value_generics: output.value_generics,
            }
        }
        Data::Enum(data) => {
            let output = derive_enum(data, &generics, &root)?;
            DeriveOutput {
                render_body: output.render_body,
                schema_fields: output.schema_fields,
                first_rule: output.first_rule,
                debug_generics: output.debug_generics,
                value_generics: output.value_generics,
            }
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Sensitive` cannot be derived for unions",
            ));
        }
    };

    if let (Some(render_with), Some(rule_span)) = (&render_with, derive_output.first_rule) {
        let mut err = syn::Error::new(
            render_with.span,
            "`render_with` replaces the field walk and cannot be combined with field rules",
        );
        err.combine(syn::Error::new(rule_span, "field rule declared here"));
        return Err(err);
    }

    let type_name = ident.unraw().to_string();
    let registrable = generics.params.is_empty();

    let bounded = add_debug_bounds(generics.clone(), &derive_output.debug_generics);
    let bounded = add_sensitive_value_bounds(bounded, &derive_output.value_generics);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    let schema_fields = &derive_output.schema_fields;
    let mut schema = quote! { #root::SensitivitySchema::new(#type_name, __SENSITIVE_FIELDS) };
    if registrable {
        schema = quote! { #schema.registrable() };
    }
    if render_with.is_some() {
        schema = quote! { #schema.custom() };
    }

    // Generic types are never keyed in the registry.
    let as_any = if registrable {
        quote! {
            fn as_any(&self) -> ::core::option::Option<&dyn ::core::any::Any> {
                ::core::option::Option::Some(self)
            }
        }
    } else {
        quote! {}
    };

    let render_body = match &render_with {
        Some(render_with) => {
            let path = &render_with.path;
            quote_spanned! { render_with.span =>
                #path(self, __fields.formatter())
            }
        }
        None => {
            let body = &derive_output.render_body;
            quote! {
                #[allow(unused_imports)]
                use #root::__private::{ViaDebug as _, ViaLeaf as _};
                #body
            }
        }
    };

    let display_impl = if skip_display {
        quote! {}
    } else {
        quote! {
            impl #impl_generics ::core::fmt::Display for #ident #ty_generics #where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #root::Redactor::render_fmt(self, f)
                }
            }
        }
    };

    // Only generate slog impl when the slog feature is enabled on the derive.
    // If slog is not available, emit a clear error with instructions.
    #[cfg(feature = "slog")]
    let slog_impl = {
        let slog_crate = slog_crate()?;
        quote! {
            impl #impl_generics #slog_crate::Value for #ident #ty_generics #where_clause {
                fn serialize(
                    &self,
                    _record: &#slog_crate::Record<'_>,
                    key: #slog_crate::Key,
                    serializer: &mut dyn #slog_crate::Serializer,
                ) -> #slog_crate::Result {
                    #root::slog::emit(self, key, serializer)
                }
            }
        }
    };

    #[cfg(not(feature = "slog"))]
    let slog_impl = quote! {};

    Ok(quote! {
        const _: () = {
            const __SENSITIVE_FIELDS: &[#root::FieldSchema] = &[#(#schema_fields),*];

            impl #impl_generics #root::SensitiveType for #ident #ty_generics #where_clause {
                const SCHEMA: &'static #root::SensitivitySchema = &#schema;

                #as_any

                fn render_fields(
                    &self,
                    __fields: &mut #root::FieldRenderer<'_, '_>,
                ) -> ::core::fmt::Result {
                    #render_body
                }
            }

            impl #impl_generics ::core::fmt::Debug for #ident #ty_generics #where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #root::Redactor::render_fmt(self, f)
                }
            }

            #display_impl

            #slog_impl

            // `slog` already provides `impl<V: Value> Value for &V`, so a reference
            // impl here would conflict with the blanket impl.
        };
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "slog")]
    #[test]
    fn slog_falls_back_to_the_runtime_reexport() {
        // The derive crate has no `slog` dependency of its own.
        if std::env::var_os("SENSITIVE_INFO_SLOG_CRATE").is_some() {
            return;
        }
        let path = slog_crate().unwrap().to_string().replace(' ', "");
        assert_eq!(path, "::sensitive_info::__private::slog");
    }

    fn expand_str(tokens: TokenStream) -> Result<String> {
        let input: DeriveInput = syn::parse2(tokens).expect("should parse as DeriveInput");
        expand(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn non_generic_types_are_registrable() {
        let output = expand_str(quote! {
            struct Customer {
                #[sensitive(email)]
                email: String,
            }
        })
        .unwrap();
        assert!(output.contains(". registrable ()"));
        assert!(output.contains("fn as_any"));
        assert!(output.contains(":: core :: fmt :: Display for Customer"));
    }

    #[test]
    fn generic_types_are_not_registrable() {
        let output = expand_str(quote! {
            struct Wrapper<T> {
                #[sensitive(text)]
                value: T,
            }
        })
        .unwrap();
        assert!(!output.contains("registrable"));
        assert!(!output.contains("fn as_any"));
        assert!(output.contains("T : :: sensitive_info :: SensitiveValue"));
    }

    #[test]
    fn skip_display_omits_display() {
        let output = expand_str(quote! {
            #[sensitive(skip_display)]
            struct Token(#[sensitive(text)] String);
        })
        .unwrap();
        assert!(!output.contains("Display"));
    }

    #[test]
    fn render_with_marks_schema_custom() {
        let output = expand_str(quote! {
            #[sensitive(render_with = "render_account")]
            struct Account {
                owner: String,
            }
        })
        .unwrap();
        assert!(output.contains(". custom ()"));
        assert!(output.contains("render_account (self , __fields . formatter ())"));
    }

    #[test]
    fn render_with_conflicts_with_field_rules() {
        let err = expand_str(quote! {
            #[sensitive(render_with = "render_account")]
            struct Account {
                #[sensitive(text)]
                owner: String,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("cannot be combined with field rules"));
    }

    #[test]
    fn unions_are_rejected() {
        let err = expand_str(quote! {
            union Bits { int: u32, float: f32 }
        })
        .unwrap_err();
        assert!(err.to_string().contains("cannot be derived for unions"));
    }
}
