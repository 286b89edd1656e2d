//! Attribute parsing and type classification for the `FlagBind` derive.

use heck::ToKebabCase;
use syn::{Attribute, Field, GenericArgument, PathArguments, Type};

/// Raw `#[flag(...)]` attribute values collected for one field.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub name: Option<String>,
    pub default: Option<String>,
    pub usage: Option<String>,
    pub layout: Option<String>,
    pub prefix: Option<String>,
    pub flatten: bool,
}

/// Syntactic classification of a field's value shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Bool,
    Int,
    Uint,
    Float,
    Str,
    Duration,
    Timestamp,
    Id,
    Seq(Box<FieldKind>),
    Structure,
}

/// Everything code generation needs to know about one field.
pub(crate) struct FieldPlan {
    pub ident: syn::Ident,
    /// Field type with any outer `Option` stripped.
    pub ty: Type,
    pub optional: bool,
    pub kind: FieldKind,
    pub attrs: FieldAttrs,
    /// Raw name spec; kebab-cased identifier when no `name` key was given.
    pub spec: String,
}

pub(crate) fn plan_field(field: &Field) -> syn::Result<FieldPlan> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "FlagBind requires named fields"))?;
    let attrs = parse_field_attrs(&field.attrs)?;
    let optional = option_inner(&field.ty).is_some();
    let ty = option_inner(&field.ty)
        .cloned()
        .unwrap_or_else(|| field.ty.clone());
    let kind = classify(&ty);

    if attrs.flatten && attrs.prefix.is_some() {
        return Err(syn::Error::new_spanned(
            field,
            "flatten and prefix are mutually exclusive",
        ));
    }
    if (attrs.flatten || attrs.prefix.is_some()) && kind != FieldKind::Structure {
        return Err(syn::Error::new_spanned(
            field,
            "only structure fields can be flattened or prefixed",
        ));
    }
    if let FieldKind::Seq(inner) = &kind {
        if matches!(inner.as_ref(), FieldKind::Structure) {
            return Err(syn::Error::new_spanned(
                field,
                "sequences of structures are not supported",
            ));
        }
    }

    let spec = attrs
        .name
        .clone()
        .unwrap_or_else(|| ident.to_string().to_kebab_case());
    Ok(FieldPlan {
        ident,
        ty,
        optional,
        kind,
        attrs,
        spec,
    })
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("flag")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                out.name = Some(lit_str(&meta)?);
            } else if meta.path.is_ident("default") {
                out.default = Some(lit_str(&meta)?);
            } else if meta.path.is_ident("usage") {
                out.usage = Some(lit_str(&meta)?);
            } else if meta.path.is_ident("layout") {
                out.layout = Some(lit_str(&meta)?);
            } else if meta.path.is_ident("prefix") {
                out.prefix = Some(lit_str(&meta)?);
            } else if meta.path.is_ident("flatten") {
                out.flatten = true;
            } else {
                return Err(meta.error("unknown flag attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

fn lit_str(meta: &syn::meta::ParseNestedMeta) -> syn::Result<String> {
    let lit: syn::LitStr = meta.value()?.parse()?;
    Ok(lit.value())
}

/// Classifies a type syntactically by its last path segment. Anything that
/// does not name a recognised scalar or `Vec` is treated as a nested
/// structure.
pub(crate) fn classify(ty: &Type) -> FieldKind {
    let ty = option_inner(ty).unwrap_or(ty);
    if let Some(elem) = vec_inner(ty) {
        return FieldKind::Seq(Box::new(classify(elem)));
    }
    match last_segment(ty).as_deref() {
        Some("bool") => FieldKind::Bool,
        Some("i8" | "i16" | "i32" | "i64" | "isize") => FieldKind::Int,
        Some("u8" | "u16" | "u32" | "u64" | "usize") => FieldKind::Uint,
        Some("f32" | "f64") => FieldKind::Float,
        Some("String") => FieldKind::Str,
        Some("Duration") => FieldKind::Duration,
        Some("DateTime") => FieldKind::Timestamp,
        Some("Uuid") => FieldKind::Id,
        _ => FieldKind::Structure,
    }
}

pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    generic_inner(ty, "Option")
}

pub(crate) fn vec_inner(ty: &Type) -> Option<&Type> {
    generic_inner(ty, "Vec")
}

fn generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn last_segment(ty: &Type) -> Option<String> {
    let Type::Path(path) = ty else { return None };
    path.path.segments.last().map(|seg| seg.ident.to_string())
}
