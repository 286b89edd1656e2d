//! Value binding: parsed `clap` matches in, populated structures out.
//!
//! The typed readers here are the bind-time counterpart of the generator's
//! kind dispatch. Structures implementing [`FlagBind`] call back into them
//! from generated (or hand-written) `bind_fields` implementations, so both
//! sides resolve names and interpret kinds identically.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::ArgMatches;
use clap::parser::ValueSource;
use uuid::Uuid;

use crate::FlagBind;
use crate::error::FlagError;

/// Tagged union of every value shape the binder can assign.
///
/// Observers receive a borrowed `FieldValue` for each successful field
/// assignment. Sequence values are reported in their raw string form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Boolean value.
    Bool(bool),
    /// Signed integer, in wire width.
    Int(i64),
    /// Unsigned integer, in wire width.
    Uint(u64),
    /// Floating-point value, in wire width.
    Float(f64),
    /// String value.
    Str(String),
    /// Duration value.
    Duration(Duration),
    /// Timestamp value.
    Timestamp(DateTime<Utc>),
    /// UUID value.
    Id(Uuid),
    /// Sequence elements, in raw string form.
    Seq(Vec<String>),
}

/// Callback invoked with the effective flag name and the assigned value.
pub type BindObserver<'a> = dyn FnMut(&str, &FieldValue) + 'a;

/// Binds a fresh `T` from parsed matches.
///
/// Each successful field assignment is logged at debug level. A structure
/// none of whose flags were touched comes back as `T::default()`.
///
/// # Errors
///
/// Returns a [`FlagError`] when a flag value cannot be converted to its
/// field's kind, or when a field's declared shape is unsupported. The bind
/// aborts on the first failure.
pub fn bind<T: FlagBind>(matches: &ArgMatches) -> Result<T, FlagError> {
    let mut log = |name: &str, value: &FieldValue| {
        tracing::debug!(flag = name, value = ?value, "bound flag value");
    };
    bind_observed(matches, &mut log)
}

/// Binds a fresh `T`, reporting each assignment to `observer`.
///
/// # Errors
///
/// Same as [`bind`].
pub fn bind_observed<T: FlagBind>(
    matches: &ArgMatches,
    observer: &mut BindObserver<'_>,
) -> Result<T, FlagError> {
    Ok(T::bind_fields(matches, "", observer)?.unwrap_or_default())
}

/// Binds from parsed matches into an existing destination, replacing it
/// whole.
///
/// # Errors
///
/// Same as [`bind`]; on error the destination is left untouched.
pub fn bind_into<T: FlagBind>(matches: &ArgMatches, dest: &mut T) -> Result<(), FlagError> {
    *dest = bind(matches)?;
    Ok(())
}

/// Whether `name` was explicitly supplied on the command line.
///
/// Defaulted values do not count as set; this is what gives omit-empty
/// fields their skip semantics.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] when `name` is unknown to the matches.
pub fn is_set(matches: &ArgMatches, name: &str) -> Result<bool, FlagError> {
    if !matches
        .try_contains_id(name)
        .map_err(|e| FlagError::lookup(name, e))?
    {
        return Ok(false);
    }
    Ok(matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine)
    ))
}

/// Reads a boolean flag; an absent value falls back to `false`.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] when `name` is unknown or mistyped.
pub fn read_bool(matches: &ArgMatches, name: &str) -> Result<bool, FlagError> {
    Ok(matches
        .try_get_one::<bool>(name)
        .map_err(|e| FlagError::lookup(name, e))?
        .copied()
        .unwrap_or_default())
}

/// Reads a signed integer flag; an absent value falls back to `0`.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] when `name` is unknown or mistyped.
pub fn read_i64(matches: &ArgMatches, name: &str) -> Result<i64, FlagError> {
    Ok(matches
        .try_get_one::<i64>(name)
        .map_err(|e| FlagError::lookup(name, e))?
        .copied()
        .unwrap_or_default())
}

/// Reads an unsigned integer flag; an absent value falls back to `0`.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] when `name` is unknown or mistyped.
pub fn read_u64(matches: &ArgMatches, name: &str) -> Result<u64, FlagError> {
    Ok(matches
        .try_get_one::<u64>(name)
        .map_err(|e| FlagError::lookup(name, e))?
        .copied()
        .unwrap_or_default())
}

/// Reads a floating-point flag; an absent value falls back to `0.0`.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] when `name` is unknown or mistyped.
pub fn read_f64(matches: &ArgMatches, name: &str) -> Result<f64, FlagError> {
    Ok(matches
        .try_get_one::<f64>(name)
        .map_err(|e| FlagError::lookup(name, e))?
        .copied()
        .unwrap_or_default())
}

/// Reads a string flag; an absent value falls back to the empty string.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] when `name` is unknown or mistyped.
pub fn read_string(matches: &ArgMatches, name: &str) -> Result<String, FlagError> {
    Ok(matches
        .try_get_one::<String>(name)
        .map_err(|e| FlagError::lookup(name, e))?
        .cloned()
        .unwrap_or_default())
}

/// Reads the raw elements of a repeated string flag.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] when `name` is unknown or mistyped.
pub fn read_raw_seq(matches: &ArgMatches, name: &str) -> Result<Vec<String>, FlagError> {
    Ok(matches
        .try_get_many::<String>(name)
        .map_err(|e| FlagError::lookup(name, e))?
        .map(|values| values.cloned().collect())
        .unwrap_or_default())
}

/// Reads a duration flag carried as a string.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] for unknown flags and [`FlagError::Parse`]
/// for malformed values.
pub fn read_duration(matches: &ArgMatches, name: &str) -> Result<Duration, FlagError> {
    let raw = read_string(matches, name)?;
    parse_duration_str(name, &raw)
}

/// Reads a timestamp flag carried as a string, honouring `layout`.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] for unknown flags and [`FlagError::Parse`]
/// for malformed values.
pub fn read_timestamp(
    matches: &ArgMatches,
    name: &str,
    layout: Option<&str>,
) -> Result<DateTime<Utc>, FlagError> {
    let raw = read_string(matches, name)?;
    parse_timestamp_str(name, &raw, layout)
}

/// Reads a UUID flag carried as a string.
///
/// # Errors
///
/// Returns [`FlagError::Lookup`] for unknown flags and [`FlagError::Parse`]
/// for malformed values.
pub fn read_id(matches: &ArgMatches, name: &str) -> Result<Uuid, FlagError> {
    let raw = read_string(matches, name)?;
    parse_id_str(name, &raw)
}

/// Parses a duration in `humantime` syntax; the empty string is the zero
/// duration.
///
/// # Errors
///
/// Returns [`FlagError::Parse`] naming `name` for malformed input.
pub fn parse_duration_str(name: &str, raw: &str) -> Result<Duration, FlagError> {
    if raw.is_empty() {
        return Ok(Duration::ZERO);
    }
    humantime::parse_duration(raw).map_err(|e| FlagError::parse(name, "duration", e))
}

/// Parses a timestamp using `layout` (a chrono format string) or RFC 3339
/// when no layout is given; the empty string is the zero timestamp.
///
/// Date-only layouts resolve to midnight UTC; layouts without an offset are
/// interpreted as UTC.
///
/// # Errors
///
/// Returns [`FlagError::Parse`] naming `name` for malformed input.
pub fn parse_timestamp_str(
    name: &str,
    raw: &str,
    layout: Option<&str>,
) -> Result<DateTime<Utc>, FlagError> {
    if raw.is_empty() {
        return Ok(DateTime::<Utc>::default());
    }
    match layout {
        None => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| FlagError::parse(name, "timestamp", e)),
        Some(fmt) => {
            parse_with_layout(raw, fmt).map_err(|e| FlagError::parse(name, "timestamp", e))
        }
    }
}

fn parse_with_layout(raw: &str, fmt: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, fmt).map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Parses a UUID from canonical text form; the empty string is the nil
/// identifier.
///
/// # Errors
///
/// Returns [`FlagError::Parse`] naming `name` for malformed input.
pub fn parse_id_str(name: &str, raw: &str) -> Result<Uuid, FlagError> {
    if raw.is_empty() {
        return Ok(Uuid::nil());
    }
    Uuid::parse_str(raw).map_err(|e| FlagError::parse(name, "uuid", e))
}

/// Parses a boolean sequence element.
///
/// # Errors
///
/// Returns [`FlagError::Parse`] naming `name` for malformed input.
pub fn parse_bool_str(name: &str, raw: &str) -> Result<bool, FlagError> {
    raw.parse().map_err(|e| FlagError::parse(name, "bool", e))
}

/// Parses a signed integer sequence element.
///
/// # Errors
///
/// Returns [`FlagError::Parse`] naming `name` for malformed input.
pub fn parse_i64_str(name: &str, raw: &str) -> Result<i64, FlagError> {
    raw.parse()
        .map_err(|e| FlagError::parse(name, "integer", e))
}

/// Parses an unsigned integer sequence element.
///
/// # Errors
///
/// Returns [`FlagError::Parse`] naming `name` for malformed input.
pub fn parse_u64_str(name: &str, raw: &str) -> Result<u64, FlagError> {
    raw.parse()
        .map_err(|e| FlagError::parse(name, "unsigned integer", e))
}

/// Parses a floating-point sequence element.
///
/// # Errors
///
/// Returns [`FlagError::Parse`] naming `name` for malformed input.
pub fn parse_f64_str(name: &str, raw: &str) -> Result<f64, FlagError> {
    raw.parse().map_err(|e| FlagError::parse(name, "float", e))
}

/// Fails with [`FlagError::Unsupported`]; support routine for generated
/// bind implementations that must reject an unrepresentable field at bind
/// time rather than at expansion time.
///
/// # Errors
///
/// Always returns [`FlagError::Unsupported`].
pub fn bail_unsupported(field: &str, detail: &'static str) -> Result<(), FlagError> {
    Err(FlagError::unsupported(field, detail))
}
