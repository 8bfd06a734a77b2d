#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros for the registration client workspace.
//!
//! Only one macro lives here today: [`macro@hustler_error`], which turns a plain enum into
//! a context-carrying error type. Every crate in the workspace declares its errors with it,
//! so error wiring (conversions, context, result aliases) looks the same everywhere.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! hustler-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring a domain error enum.
///
/// # What it generates
///
/// * `#[derive(Debug, thiserror::Error)]` unless those derives are already present.
/// * A `<Name>Ext<T>` trait with `.context(...)`, implemented for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant that wraps a source error.
/// * `From<Source>` for every variant with a `source` field (or a field marked `#[source]`
///   / `#[from]`), so `?` converts upstream errors.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant
///   exists.
/// * A `<Stem>Result<T>` alias, where the stem is the enum name without its `Error`
///   suffix (`ApiError` → `ApiResult<T>`).
/// * A module-private `format_context` helper for use inside `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant must use named fields.
/// 3. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 4. Variants wrapping a source error must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[hustler_derive::hustler_error]
/// pub enum ApiError {
///     #[error("Transport failure{}: {source}", format_context(.context))]
///     Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal client error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn fetch() -> ApiResult<String> {
///     let body = download().context("Fetching options")?;
///     body.ok_or_else(|| "empty body".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn hustler_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
