#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Sealant workspace.
//! The only macro today is [`macro@sealant_error`], which turns a plain enum into an error type
//! wired for context propagation, fatal/recoverable classification and source attribution.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! sealant-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! The doc example is `ignore`d to avoid compiling in this crate; see `tests/ui` for
//! compiled usages.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field
///   (or a field marked `#[source]`/`#[from]`), enabling the `?` operator for upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant is present.
/// * **Severity**: Variants tagged `#[fatal]` make `is_fatal()` return `true`. The marker is
///   stripped before `thiserror` sees the enum.
/// * **Attribution**: Variants with a `declaration` field (anything `AsRef<str>`) expose it
///   through `declaration()`, so callers can attribute the failure to a source declaration.
/// * **Kind**: `kind()` returns the variant name as a `&'static str`.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must also carry the `context` field.
/// 4. Tuple or unit variants are rejected to keep error wiring explicit and reliable.
///
/// # Example
///
/// ```rust,ignore
/// use sealant_derive::sealant_error;
/// use std::borrow::Cow;
///
/// #[sealant_error]
/// pub enum GeneratorError {
///     #[error("Shape violation in {declaration}{}: {message}", format_context(.context))]
///     ShapeViolation {
///         declaration: Cow<'static, str>,
///         message: Cow<'static, str>,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[fatal]
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn sealant_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
