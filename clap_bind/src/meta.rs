//! Field descriptor model shared by flag generation and value binding.
//!
//! A [`StructMeta`] is an ordered table of [`FieldMeta`] descriptors. The
//! derive macro in `clap_bind_macros` emits one per annotated struct, but the
//! table is equally constructible by hand through the builder methods, which
//! is the registration path for types that cannot carry the derive.

use std::fmt;

use crate::FlagBind;

/// Canonical interpretation of a field's raw name annotation.
///
/// Parsed from a comma-separated spec such as `"count,c,omitempty"`: the
/// first token is the primary name, the reserved token `omitempty` marks the
/// field as skippable when its flag was not supplied, and every other token
/// is an alias.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameSpec {
    name: String,
    aliases: Vec<String>,
    omit_empty: bool,
}

impl NameSpec {
    /// Parses a raw comma-separated name annotation.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut tokens = split_csv(raw).into_iter();
        let name = tokens.next().unwrap_or_default();
        let mut aliases = Vec::new();
        let mut omit_empty = false;
        for token in tokens {
            if token == "omitempty" {
                omit_empty = true;
            } else if !token.is_empty() {
                aliases.push(token);
            }
        }
        Self {
            name,
            aliases,
            omit_empty,
        }
    }

    /// Primary flag name, before prefix resolution.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alias names in declaration order.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Whether the field is skipped when its flag was not supplied.
    #[must_use]
    pub const fn omit_empty(&self) -> bool {
        self.omit_empty
    }
}

/// Splits `s` on commas, trimming surrounding whitespace from each element.
///
/// An empty or all-whitespace input yields an empty list.
#[must_use]
pub fn split_csv(s: &str) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split(',').map(|part| part.trim().to_owned()).collect()
}

/// Resolves a declared name against the accumulated prefix.
#[must_use]
pub fn resolve_name(prefix: &str, name: &str) -> String {
    format!("{prefix}{name}")
}

/// Resolves an alias against the accumulated prefix.
///
/// Aliases longer than one character receive the prefix; single-character
/// aliases are short forms and stay as declared.
#[must_use]
pub fn resolve_alias(prefix: &str, alias: &str) -> String {
    if alias.chars().count() > 1 {
        format!("{prefix}{alias}")
    } else {
        alias.to_owned()
    }
}

/// Classification of a field's underlying value shape.
#[derive(Debug, Clone)]
pub enum ValueKind {
    /// Boolean flag.
    Bool,
    /// Signed integer, carried as `i64` on the wire.
    Int,
    /// Unsigned integer, carried as `u64` on the wire.
    Uint,
    /// Floating-point number, carried as `f64` on the wire.
    Float,
    /// Plain string.
    Str,
    /// `std::time::Duration`, carried as a string flag.
    Duration,
    /// `chrono::DateTime<Utc>`, carried as a string flag.
    Timestamp,
    /// UUID, carried as a string flag.
    Id,
    /// Repeated flag; the element kind must not itself be a sequence.
    Seq(Box<ValueKind>),
    /// Nested structure with its own descriptor table.
    Nested(NestedMeta),
}

/// How a nested structure participates in the parent's flag namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestMode {
    /// Merge the nested fields into the parent namespace unchanged.
    Flatten,
    /// Include the nested fields under an additional name prefix.
    Prefix(String),
}

/// Link from a parent field to a nested structure's descriptor table.
#[derive(Clone)]
pub struct NestedMeta {
    mode: NestMode,
    meta: fn() -> StructMeta,
}

impl NestedMeta {
    /// Participation mode in the parent namespace.
    #[must_use]
    pub const fn mode(&self) -> &NestMode {
        &self.mode
    }

    /// Builds the nested structure's descriptor table.
    #[must_use]
    pub fn table(&self) -> StructMeta {
        (self.meta)()
    }
}

impl fmt::Debug for NestedMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedMeta")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Declarative descriptor for a single field.
///
/// Built once per traversal step; never cached. The same descriptor drives
/// both the flag definition and the bind-time read, which keeps the two in
/// lockstep.
#[derive(Debug, Clone)]
pub struct FieldMeta {
    spec: Option<String>,
    default: Option<String>,
    usage: Option<String>,
    layout: Option<String>,
    kind: ValueKind,
}

impl FieldMeta {
    /// Creates a leaf descriptor from a raw name annotation and a kind.
    #[must_use]
    pub fn new(spec: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            spec: Some(spec.into()),
            default: None,
            usage: None,
            layout: None,
            kind,
        }
    }

    /// Creates a descriptor for a nested structure included under `prefix`.
    #[must_use]
    pub fn nested<T: FlagBind>(prefix: impl Into<String>) -> Self {
        Self {
            spec: None,
            default: None,
            usage: None,
            layout: None,
            kind: ValueKind::Nested(NestedMeta {
                mode: NestMode::Prefix(prefix.into()),
                meta: T::metadata,
            }),
        }
    }

    /// Creates a descriptor for a nested structure flattened into the
    /// parent's namespace.
    #[must_use]
    pub fn flattened<T: FlagBind>() -> Self {
        Self {
            spec: None,
            default: None,
            usage: None,
            layout: None,
            kind: ValueKind::Nested(NestedMeta {
                mode: NestMode::Flatten,
                meta: T::metadata,
            }),
        }
    }

    /// Attaches a raw name annotation.
    ///
    /// On a flattened structure this records a configuration error that
    /// generation and binding reject.
    #[must_use]
    pub fn spec(mut self, raw: impl Into<String>) -> Self {
        self.spec = Some(raw.into());
        self
    }

    /// Sets the default value, in string form.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the usage text shown in help output.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Sets the time layout used when parsing timestamp values.
    #[must_use]
    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Parses the raw name annotation into its canonical form.
    #[must_use]
    pub fn name_spec(&self) -> NameSpec {
        NameSpec::parse(self.spec.as_deref().unwrap_or_default())
    }

    /// The raw name annotation, when one was declared.
    #[must_use]
    pub fn raw_spec(&self) -> Option<&str> {
        self.spec.as_deref()
    }

    /// The default value in string form, when one was declared.
    #[must_use]
    pub fn default_text(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The usage text, when declared.
    #[must_use]
    pub fn usage_text(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// The time layout override, when declared.
    #[must_use]
    pub fn time_layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    /// The field's value kind.
    #[must_use]
    pub const fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// A field is required when it has no usable default and is not marked
    /// omit-empty. An empty default string counts as absent.
    #[must_use]
    pub fn required(&self) -> bool {
        let has_default = self.default.as_deref().is_some_and(|d| !d.is_empty());
        !self.name_spec().omit_empty() && !has_default
    }
}

/// Ordered descriptor table for a structure's fields.
#[derive(Debug, Clone, Default)]
pub struct StructMeta {
    fields: Vec<FieldMeta>,
}

impl StructMeta {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field descriptor.
    #[must_use]
    pub fn field(mut self, field: FieldMeta) -> Self {
        self.fields.push(field);
        self
    }

    /// The descriptors, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }
}

#[cfg(test)]
mod tests;
