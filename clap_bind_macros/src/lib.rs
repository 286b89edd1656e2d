//! Procedural macros for `clap_bind`.
//!
//! The [`FlagBind`] derive inspects a struct's named fields and their
//! `#[flag(...)]` attributes and generates both the descriptor table used
//! for flag generation and the field-by-field binding implementation. Field
//! names default to the kebab-cased field identifier when no `name` key is
//! given.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `clap_bind::FlagBind`.
///
/// Recognised `#[flag(...)]` keys:
///
/// - `name = "primary,alias,omitempty"` — comma-separated primary name,
///   aliases, and the reserved `omitempty` marker;
/// - `default = "..."` — default value in string form;
/// - `usage = "..."` — help text;
/// - `layout = "..."` — chrono format string for timestamp fields;
/// - `prefix = "..."` — includes a nested structure under a name prefix;
/// - `flatten` — merges a nested structure into the parent namespace.
///
/// A nested structure field carrying neither `prefix` nor `flatten`
/// contributes no flags.
#[proc_macro_derive(FlagBind, attributes(flag))]
pub fn derive_flag_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
