//! Declarative struct-to-flag binding for `clap`.
//!
//! `clap_bind` maps a structure's annotated fields to a flat namespace of
//! named, typed command-line flags, and populates such a structure from the
//! parsed matches. It is a convenience layer over `clap`: tokenizing,
//! matching, help text, and required-flag enforcement all stay with `clap`.
//!
//! A structure opts in through [`FlagBind`], implemented either by the
//! companion derive macro in `clap_bind_macros` or by hand via the
//! [`StructMeta`] builder.
//!
//! ```
//! use clap_bind::FlagBind;
//!
//! #[derive(Debug, Default, FlagBind)]
//! struct Config {
//!     #[flag(name = "name,n", default = "guest", usage = "User name")]
//!     name: String,
//!     #[flag(default = "3", usage = "How many items")]
//!     count: i64,
//! }
//!
//! # fn main() -> Result<(), clap_bind::FlagError> {
//! let cmd = clap_bind::bound_command::<Config>("demo")?;
//! let matches = cmd.get_matches_from(["demo", "--count", "7"]);
//! let cfg: Config = clap_bind::bind(&matches)?;
//! assert_eq!(cfg.name, "guest");
//! assert_eq!(cfg.count, 7);
//! # Ok(())
//! # }
//! ```

pub use clap_bind_macros::FlagBind;

mod bind;
mod command;
mod error;
mod generate;
mod meta;

pub use bind::{
    BindObserver, FieldValue, bail_unsupported, bind, bind_into, bind_observed, is_set,
    parse_bool_str, parse_duration_str, parse_f64_str, parse_i64_str, parse_id_str,
    parse_timestamp_str, parse_u64_str, read_bool, read_duration, read_f64, read_i64, read_id,
    read_raw_seq, read_string, read_timestamp, read_u64,
};
pub use command::{bound_command, with_binding};
pub use error::FlagError;
pub use generate::{args_from, args_from_meta};
pub use meta::{
    FieldMeta, NameSpec, NestMode, NestedMeta, StructMeta, ValueKind, resolve_alias, resolve_name,
    split_csv,
};

pub use clap::ArgMatches;

/// Trait implemented by structures whose fields map to command-line flags.
///
/// [`metadata`](FlagBind::metadata) and
/// [`bind_fields`](FlagBind::bind_fields) are two views of the same
/// annotation set: the first feeds flag generation, the second reads the
/// parsed values back. Both resolve names identically, so a flag defined at
/// generation time is always discoverable at bind time.
pub trait FlagBind: Default {
    /// Descriptor table for the structure's fields, in declaration order.
    fn metadata() -> StructMeta;

    /// Populates a value from parsed matches, resolving flag names under
    /// `prefix` and reporting each successful assignment to `observer`.
    ///
    /// Returns `Ok(None)` when no flag touched any field, so callers can
    /// distinguish an untouched substructure from an explicitly zeroed one.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagError`] when a flag value cannot be converted to its
    /// field's kind, or when a field's declared shape is unsupported.
    fn bind_fields(
        matches: &ArgMatches,
        prefix: &str,
        observer: &mut BindObserver<'_>,
    ) -> Result<Option<Self>, FlagError>;
}
