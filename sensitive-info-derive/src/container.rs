//! Container-level attribute parsing for `#[derive(Sensitive)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.

use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// Options parsed from container-level `#[sensitive(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// If true, skip generating the `Display` impl.
    pub(crate) skip_display: bool,
    /// Hand-written renderer replacing the field walk.
    pub(crate) render_with: Option<RenderWith>,
}

#[derive(Clone, Debug)]
pub(crate) struct RenderWith {
    pub(crate) path: syn::ExprPath,
    pub(crate) span: proc_macro2::Span,
}

/// Parses container-level `#[sensitive(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("sensitive") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected container options, e.g. #[sensitive(render_with = \"path\")]",
                ));
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip_display") {
                        options.skip_display = true;
                        Ok(())
                    } else if meta.path.is_ident("render_with") {
                        if options.render_with.is_some() {
                            return Err(meta.error("duplicate `render_with` option"));
                        }
                        let lit: LitStr = meta.value()?.parse()?;
                        options.render_with = Some(RenderWith {
                            path: lit.parse()?,
                            span: lit.span(),
                        });
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `render_with` or `skip_display`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[sensitive]",
                ));
            }
        }
    }

    Ok(options)
}
