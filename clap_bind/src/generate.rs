//! Flag generation: descriptor tables in, `clap` arguments out.
//!
//! Generation is a pure walk of a [`StructMeta`] table. Each leaf field
//! becomes one [`clap::Arg`]; nested tables are walked recursively with an
//! accumulated name prefix. All semantic parsing for string-carried kinds
//! (durations, timestamps, identifiers) is deferred to bind time.

use clap::{Arg, ArgAction};

use crate::FlagBind;
use crate::error::FlagError;
use crate::meta::{FieldMeta, NestMode, StructMeta, ValueKind, resolve_alias, resolve_name, split_csv};

/// Generates one `clap` argument per leaf field of `T`'s descriptor table.
///
/// # Errors
///
/// Returns [`FlagError::Unsupported`] for declarations that cannot be
/// represented as flags, such as nested sequences or a flattened structure
/// carrying a flag name.
pub fn args_from<T: FlagBind>() -> Result<Vec<Arg>, FlagError> {
    args_from_meta(&T::metadata(), "")
}

/// Generates arguments from an explicit descriptor table under `prefix`.
///
/// This is the entry point for hand-registered tables; the derive-backed
/// [`args_from`] goes through it with the root prefix.
///
/// # Errors
///
/// Returns [`FlagError::Unsupported`] for unrepresentable declarations.
pub fn args_from_meta(meta: &StructMeta, prefix: &str) -> Result<Vec<Arg>, FlagError> {
    let mut args = Vec::new();
    push_args(meta, prefix, &mut args)?;
    Ok(args)
}

fn push_args(meta: &StructMeta, prefix: &str, out: &mut Vec<Arg>) -> Result<(), FlagError> {
    for field in meta.fields() {
        match field.kind() {
            ValueKind::Nested(nested) => match nested.mode() {
                NestMode::Flatten => {
                    if let Some(raw) = field.raw_spec() {
                        return Err(FlagError::unsupported(
                            raw,
                            "a flattened structure cannot carry a flag name",
                        ));
                    }
                    push_args(&nested.table(), prefix, out)?;
                }
                NestMode::Prefix(p) => {
                    let extended = format!("{prefix}{p}");
                    push_args(&nested.table(), &extended, out)?;
                }
            },
            _ => out.push(leaf_arg(field, prefix)?),
        }
    }
    Ok(())
}

fn leaf_arg(field: &FieldMeta, prefix: &str) -> Result<Arg, FlagError> {
    let spec = field.name_spec();
    if spec.name().is_empty() {
        return Err(FlagError::unsupported("", "flag name is empty"));
    }
    let name = resolve_name(prefix, spec.name());
    let required = field.required();
    let default = field.default_text().unwrap_or_default();

    let mut arg = Arg::new(name.clone()).long(name.clone()).required(required);
    if let Some(usage) = field.usage_text() {
        arg = arg.help(usage.to_owned());
    }
    arg = apply_aliases(arg, prefix, spec.aliases());

    // A required arg never also carries a default; clap rejects the
    // combination. Malformed numeric and boolean defaults degrade to the
    // zero value instead of failing flag-set construction.
    let arg = match field.kind() {
        ValueKind::Bool => {
            let mut a = arg
                .value_parser(clap::value_parser!(bool))
                .action(ArgAction::Set)
                .num_args(0..=1)
                .default_missing_value("true");
            if !required {
                a = a.default_value(default.parse::<bool>().unwrap_or_default().to_string());
            }
            a
        }
        ValueKind::Int => {
            let mut a = arg
                .value_parser(clap::value_parser!(i64))
                .action(ArgAction::Set)
                .allow_negative_numbers(true);
            if !required {
                a = a.default_value(default.parse::<i64>().unwrap_or_default().to_string());
            }
            a
        }
        ValueKind::Uint => {
            let mut a = arg
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set);
            if !required {
                a = a.default_value(default.parse::<u64>().unwrap_or_default().to_string());
            }
            a
        }
        ValueKind::Float => {
            let mut a = arg
                .value_parser(clap::value_parser!(f64))
                .action(ArgAction::Set)
                .allow_negative_numbers(true);
            if !required {
                a = a.default_value(default.parse::<f64>().unwrap_or_default().to_string());
            }
            a
        }
        ValueKind::Str | ValueKind::Duration | ValueKind::Timestamp | ValueKind::Id => {
            let mut a = arg
                .value_parser(clap::value_parser!(String))
                .action(ArgAction::Set);
            if !required {
                a = a.default_value(default.to_owned());
            }
            a
        }
        ValueKind::Seq(inner) => {
            match inner.as_ref() {
                ValueKind::Seq(_) => {
                    return Err(FlagError::unsupported(
                        &name,
                        "nested sequences are not supported",
                    ));
                }
                ValueKind::Nested(_) => {
                    return Err(FlagError::unsupported(
                        &name,
                        "sequences of structures are not supported",
                    ));
                }
                _ => {}
            }
            let mut a = arg
                .value_parser(clap::value_parser!(String))
                .action(ArgAction::Append)
                .value_delimiter(',');
            if !required {
                let defaults = split_csv(default);
                if !defaults.is_empty() {
                    a = a.default_values(defaults);
                }
            }
            a
        }
        ValueKind::Nested(_) => {
            return Err(FlagError::unsupported(
                &name,
                "structures are grouped by prefix, not emitted as flags",
            ));
        }
    };
    Ok(arg)
}

fn apply_aliases(mut arg: Arg, prefix: &str, aliases: &[String]) -> Arg {
    let mut short_taken = false;
    for alias in aliases {
        let mut chars = alias.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                if short_taken {
                    arg = arg.visible_short_alias(c);
                } else {
                    arg = arg.short(c);
                    short_taken = true;
                }
            }
            (Some(_), Some(_)) => {
                arg = arg.visible_alias(resolve_alias(prefix, alias));
            }
            (None, _) => {}
        }
    }
    arg
}
