//! Composition helpers pairing flag generation with typed binding.
//!
//! These add no logic of their own; they sequence [`bind`] in front of a
//! caller-supplied handler and bundle [`args_from`] into a named command.

use clap::{ArgMatches, Command};

use crate::FlagBind;
use crate::bind::bind;
use crate::error::FlagError;
use crate::generate::args_from;

/// Wraps a typed handler so flag values are bound into `T` before the call.
///
/// The returned closure fits wherever a `&ArgMatches` is dispatched, for
/// example after matching the subcommand built by [`bound_command`].
pub fn with_binding<T, E, F>(handler: F) -> impl Fn(&ArgMatches) -> Result<(), E>
where
    T: FlagBind,
    E: From<FlagError>,
    F: Fn(T) -> Result<(), E>,
{
    move |matches| {
        let value = bind::<T>(matches)?;
        handler(value)
    }
}

/// Builds a named command whose arguments come from `T`'s descriptor table.
///
/// Pair with [`with_binding`] to run a typed handler once the command's
/// matches are available.
///
/// # Errors
///
/// Returns [`FlagError::Unsupported`] when `T` declares a shape that cannot
/// be represented as flags.
pub fn bound_command<T: FlagBind>(name: impl Into<clap::builder::Str>) -> Result<Command, FlagError> {
    Ok(Command::new(name).args(args_from::<T>()?))
}
