//! Declarative masking of sensitive fields.
//!
//! Mark the fields of a type with the kind of sensitive data they hold and
//! every textual rendering of that type (`Debug`, `Display`, [`render`],
//! structured logging) masks them. Call sites never mask by hand.
//!
//! ```rust
//! use sensitive_info::{render, Sensitive};
//!
//! #[derive(Sensitive)]
//! struct Customer {
//!     name: String,
//!     #[sensitive(email)]
//!     email: String,
//!     #[sensitive(number, visibility = 4)]
//!     card: u64,
//! }
//!
//! let customer = Customer {
//!     name: "Mariano".into(),
//!     email: "mariano@test.com".into(),
//!     card: 4242424242424242,
//! };
//!
//! assert_eq!(
//!     render(&customer),
//!     r#"Customer { name: "Mariano", email: "***@test.com", card: "************4242" }"#
//! );
//! assert_eq!(format!("{customer}"), format!("{customer:?}"));
//! ```
//!
//! This crate separates:
//! - **Rules**: what kind of sensitive data a field holds ([`FieldRule`]).
//! - **Masking**: how each kind is obscured ([`mask`]).
//! - **Schemas**: which fields of a type carry which rule ([`SensitivitySchema`]),
//!   compiled by `#[derive(Sensitive)]`.
//! - **Rendering**: walking a value and masking as it goes ([`Redactor`]).
//!
//! Key rules:
//! - `#[sensitive(date)]`, `#[sensitive(email)]`, `#[sensitive(text)]` and
//!   `#[sensitive(number)]` mark leaf fields. `visibility = N` keeps the last
//!   `N` characters; dates take `pattern = "dd/[MM]/yyyy"` instead, and the
//!   pattern must leave at least one component masked.
//! - Unannotated fields render through their own `Debug`. Nested types that
//!   derive `Sensitive` mask themselves.
//! - `#[sensitive(render_with = "path")]` on the type replaces the field walk
//!   with a hand-written function.
//! - A [`Registry`] installed at startup adds rules or renderers for types
//!   without attributes. A registered renderer always wins.
//!
//! Feature flags:
//! - `chrono`: `chrono` date types are [`SensitiveValue`]s and date patterns
//!   apply to their calendar parts.
//! - `slog`: derived types implement `slog::Value`; see the `slog` module.
//!   The impl names a top-level `slog` crate when the deriving crate has one
//!   and the copy re-exported here otherwise, so the feature stays additive.
//!
//! Mistakes in attributes are compile errors:
//!
//! ```compile_fail
//! use sensitive_info::Sensitive;
//!
//! #[derive(Sensitive)]
//! struct Flags {
//!     #[sensitive(text)]
//!     active: bool,
//! }
//! ```
//!
//! ```compile_fail
//! use sensitive_info::Sensitive;
//!
//! #[derive(Sensitive)]
//! struct Person {
//!     #[sensitive(date, visibility = 2)]
//!     birthday: String,
//! }
//! ```
//!
//! ```compile_fail
//! use sensitive_info::Sensitive;
//!
//! #[derive(Sensitive)]
//! struct Person {
//!     #[sensitive(date, pattern = "dd/[MM/yyyy")]
//!     birthday: String,
//! }
//! ```
//!
//! ```compile_fail
//! use sensitive_info::Sensitive;
//!
//! #[derive(Sensitive)]
//! struct Person {
//!     #[sensitive(date, pattern = "[dd/MM/yyyy]")]
//!     birthday: String,
//! }
//! ```
//!
//! ```compile_fail
//! use sensitive_info::Sensitive;
//!
//! #[derive(Sensitive)]
//! struct Account {
//!     #[sensitive(email, number)]
//!     id: String,
//! }
//! ```
//!
//! ```compile_fail
//! use sensitive_info::Sensitive;
//!
//! #[derive(Sensitive)]
//! struct Account {
//!     #[sensitive(email)]
//!     id: u64,
//! }
//! ```
//!
//! ```compile_fail
//! use sensitive_info::Sensitive;
//!
//! struct Opaque;
//!
//! #[derive(Sensitive)]
//! struct Wrapper {
//!     #[sensitive(text)]
//!     inner: Opaque,
//! }
//! ```
//!
//! ```compile_fail
//! use std::fmt;
//! use sensitive_info::Sensitive;
//!
//! fn render_account(_: &Account, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!     f.write_str("Account")
//! }
//!
//! #[derive(Sensitive)]
//! #[sensitive(render_with = "render_account")]
//! struct Account {
//!     #[sensitive(text)]
//!     owner: String,
//! }
//! ```
//!
//! ```compile_fail
//! use sensitive_info::Sensitive;
//!
//! #[derive(Sensitive)]
//! union Bits {
//!     int: u32,
//!     float: f32,
//! }
//! ```
//!
//! What it does not do:
//! - perform I/O or logging
//! - mask elements of std containers (`Vec<String>` renders structurally;
//!   wrap the elements in a type that derives `Sensitive`)
//! - detect cycles (values are assumed acyclic)

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

pub use sensitive_info_derive::Sensitive;

#[allow(unused_extern_crates)]
extern crate self as sensitive_info;

// Module declarations
pub mod mask;
mod redactor;
mod registry;
mod rule;
mod schema;
#[cfg(feature = "slog")]
pub mod slog;
mod value;

#[doc(hidden)]
#[path = "private.rs"]
pub mod __private;

// Re-exports
pub use mask::{DATE_PLACEHOLDER, MASK_CHAR, PLACEHOLDER};
pub use redactor::{
    render, render_pretty, FieldRenderer, FieldValue, NamedFields, Redactor, TupleFields,
};
pub use registry::{Registry, RegistryBuilder, RegistryError};
pub use rule::{
    FieldKind, FieldRule, RuleError, DEFAULT_EMAIL_VISIBILITY, DEFAULT_NUMBER_VISIBILITY,
    DEFAULT_TEXT_VISIBILITY,
};
pub use schema::{FieldSchema, SensitiveType, SensitivitySchema};
pub use value::{DateParts, SensitiveValue};
