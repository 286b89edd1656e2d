//! Error type shared by flag generation and value binding.

use std::fmt;

use thiserror::Error;

/// Errors produced while generating flag definitions or binding values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// The flag is unknown to, or typed differently in, the parsed matches.
    #[error("failed to look up flag '{name}': {source}")]
    Lookup {
        /// Effective flag name that was queried.
        name: String,
        /// Underlying lookup failure reported by `clap`.
        #[source]
        source: clap::parser::MatchesError,
    },

    /// A flag's string value could not be converted to the field's kind.
    #[error("failed to parse value of flag '{name}' as {kind}: {message}")]
    Parse {
        /// Effective flag name whose value failed to convert.
        name: String,
        /// Target kind the value was being parsed as.
        kind: &'static str,
        /// Description of the underlying conversion failure.
        message: String,
    },

    /// The field's declared shape cannot be represented as flags.
    #[error("field '{field}' has an unsupported shape: {detail}")]
    Unsupported {
        /// Field or flag name carrying the unsupported declaration.
        field: String,
        /// What made the declaration unrepresentable.
        detail: &'static str,
    },
}

impl FlagError {
    pub(crate) fn lookup(name: &str, source: clap::parser::MatchesError) -> Self {
        Self::Lookup {
            name: name.to_owned(),
            source,
        }
    }

    /// Builds a [`FlagError::Parse`] for `name` from any displayable cause.
    #[must_use]
    pub fn parse(name: &str, kind: &'static str, cause: impl fmt::Display) -> Self {
        Self::Parse {
            name: name.to_owned(),
            kind,
            message: cause.to_string(),
        }
    }

    /// Builds a [`FlagError::Unsupported`] for `field`.
    #[must_use]
    pub fn unsupported(field: &str, detail: &'static str) -> Self {
        Self::Unsupported {
            field: field.to_owned(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests;
