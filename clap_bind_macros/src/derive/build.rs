//! Code generation for the `FlagBind` derive: descriptor-table entries and
//! per-field bind stanzas.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::LitStr;

use super::parse::{FieldKind, FieldPlan, vec_inner};

/// Builds the `FieldMeta` expression for one field, or `None` when the
/// field is excluded (a structure with neither `prefix` nor `flatten`).
pub(crate) fn metadata_entry(plan: &FieldPlan) -> Option<TokenStream> {
    let ty = &plan.ty;
    if plan.kind == FieldKind::Structure {
        if plan.attrs.flatten {
            let mut entry = quote! { clap_bind::FieldMeta::flattened::<#ty>() };
            if let Some(name) = &plan.attrs.name {
                // Illegal combination; carried through so generation and
                // binding both reject it.
                entry = quote! { #entry.spec(#name) };
            }
            return Some(entry);
        }
        if let Some(prefix) = &plan.attrs.prefix {
            return Some(quote! { clap_bind::FieldMeta::nested::<#ty>(#prefix) });
        }
        return None;
    }

    let spec = &plan.spec;
    let kind = kind_tokens(&plan.kind);
    let mut entry = quote! { clap_bind::FieldMeta::new(#spec, #kind) };
    if let Some(default) = &plan.attrs.default {
        entry = quote! { #entry.default_value(#default) };
    }
    if let Some(usage) = &plan.attrs.usage {
        entry = quote! { #entry.usage(#usage) };
    }
    if let Some(layout) = &plan.attrs.layout {
        entry = quote! { #entry.layout(#layout) };
    }
    Some(entry)
}

fn kind_tokens(kind: &FieldKind) -> TokenStream {
    match kind {
        FieldKind::Bool => quote! { clap_bind::ValueKind::Bool },
        FieldKind::Int => quote! { clap_bind::ValueKind::Int },
        FieldKind::Uint => quote! { clap_bind::ValueKind::Uint },
        FieldKind::Float => quote! { clap_bind::ValueKind::Float },
        FieldKind::Str => quote! { clap_bind::ValueKind::Str },
        FieldKind::Duration => quote! { clap_bind::ValueKind::Duration },
        FieldKind::Timestamp => quote! { clap_bind::ValueKind::Timestamp },
        FieldKind::Id => quote! { clap_bind::ValueKind::Id },
        FieldKind::Seq(inner) => {
            let inner = kind_tokens(inner);
            quote! { clap_bind::ValueKind::Seq(::std::boxed::Box::new(#inner)) }
        }
        FieldKind::Structure => {
            quote! { ::core::compile_error!("structure kind in leaf position") }
        }
    }
}

/// Builds the bind stanza for one field, or `None` when the field is
/// excluded from binding.
pub(crate) fn bind_stanza(plan: &FieldPlan) -> syn::Result<Option<TokenStream>> {
    let ident = &plan.ident;
    let ty = &plan.ty;

    if plan.kind == FieldKind::Structure {
        if plan.attrs.flatten {
            if let Some(name) = &plan.attrs.name {
                return Ok(Some(quote! {
                    clap_bind::bail_unsupported(#name, "a flattened structure cannot carry a flag name")?;
                }));
            }
            let assign = wrap_optional(plan, quote! { nested });
            return Ok(Some(quote! {
                if let ::core::option::Option::Some(nested) =
                    <#ty as clap_bind::FlagBind>::bind_fields(matches, prefix, observer)?
                {
                    value.#ident = #assign;
                    defined = true;
                }
            }));
        }
        if let Some(prefix_attr) = &plan.attrs.prefix {
            let assign = wrap_optional(plan, quote! { nested });
            return Ok(Some(quote! {
                {
                    let nested_prefix = ::std::format!("{}{}", prefix, #prefix_attr);
                    if let ::core::option::Option::Some(nested) =
                        <#ty as clap_bind::FlagBind>::bind_fields(matches, &nested_prefix, observer)?
                    {
                        value.#ident = #assign;
                        defined = true;
                    }
                }
            }));
        }
        return Ok(None);
    }

    if let FieldKind::Seq(inner) = &plan.kind {
        if matches!(inner.as_ref(), FieldKind::Seq(_)) {
            let field = ident.to_string();
            return Ok(Some(quote! {
                clap_bind::bail_unsupported(#field, "nested sequences are not supported")?;
            }));
        }
    }

    let spec = &plan.spec;
    let body = leaf_body(plan)?;
    Ok(Some(quote! {
        {
            let spec = clap_bind::NameSpec::parse(#spec);
            let flag = clap_bind::resolve_name(prefix, spec.name());
            if clap_bind::is_set(matches, &flag)? || !spec.omit_empty() {
                #body
            }
        }
    }))
}

fn leaf_body(plan: &FieldPlan) -> syn::Result<TokenStream> {
    let ident = &plan.ident;
    let ty = &plan.ty;
    let layout = layout_tokens(plan);

    let (read, observed) = match &plan.kind {
        FieldKind::Bool => (
            quote! { let converted = clap_bind::read_bool(matches, &flag)?; },
            quote! { clap_bind::FieldValue::Bool(converted) },
        ),
        FieldKind::Int => {
            let ty_name = type_name(ty);
            (
                quote! {
                    let raw = clap_bind::read_i64(matches, &flag)?;
                    let converted = <#ty as ::core::convert::TryFrom<i64>>::try_from(raw)
                        .map_err(|_| clap_bind::FlagError::parse(&flag, #ty_name, "value out of range"))?;
                },
                quote! { clap_bind::FieldValue::Int(raw) },
            )
        }
        FieldKind::Uint => {
            let ty_name = type_name(ty);
            (
                quote! {
                    let raw = clap_bind::read_u64(matches, &flag)?;
                    let converted = <#ty as ::core::convert::TryFrom<u64>>::try_from(raw)
                        .map_err(|_| clap_bind::FlagError::parse(&flag, #ty_name, "value out of range"))?;
                },
                quote! { clap_bind::FieldValue::Uint(raw) },
            )
        }
        FieldKind::Float => (
            quote! {
                let raw = clap_bind::read_f64(matches, &flag)?;
                let converted = raw as #ty;
            },
            quote! { clap_bind::FieldValue::Float(raw) },
        ),
        FieldKind::Str => (
            quote! { let converted = clap_bind::read_string(matches, &flag)?; },
            quote! { clap_bind::FieldValue::Str(converted.clone()) },
        ),
        FieldKind::Duration => (
            quote! { let converted = clap_bind::read_duration(matches, &flag)?; },
            quote! { clap_bind::FieldValue::Duration(converted) },
        ),
        FieldKind::Timestamp => (
            quote! { let converted = clap_bind::read_timestamp(matches, &flag, #layout)?; },
            quote! { clap_bind::FieldValue::Timestamp(converted) },
        ),
        FieldKind::Id => (
            quote! { let converted = clap_bind::read_id(matches, &flag)?; },
            quote! { clap_bind::FieldValue::Id(converted) },
        ),
        FieldKind::Seq(inner) => return seq_body(plan, inner),
        FieldKind::Structure => {
            return Err(syn::Error::new_spanned(ident, "structure kind in leaf position"));
        }
    };

    let assign = wrap_optional(plan, quote! { converted });
    Ok(quote! {
        #read
        observer(&flag, &#observed);
        value.#ident = #assign;
        defined = true;
    })
}

fn seq_body(plan: &FieldPlan, inner: &FieldKind) -> syn::Result<TokenStream> {
    let ident = &plan.ident;
    let elem_ty = vec_inner(&plan.ty)
        .ok_or_else(|| syn::Error::new_spanned(&plan.ty, "expected a Vec type"))?;
    let layout = layout_tokens(plan);

    let elem_expr = match inner {
        FieldKind::Bool => quote! { clap_bind::parse_bool_str(&flag, element)? },
        FieldKind::Int => {
            let ty_name = type_name(elem_ty);
            quote! {
                <#elem_ty as ::core::convert::TryFrom<i64>>::try_from(
                    clap_bind::parse_i64_str(&flag, element)?,
                )
                .map_err(|_| clap_bind::FlagError::parse(&flag, #ty_name, "value out of range"))?
            }
        }
        FieldKind::Uint => {
            let ty_name = type_name(elem_ty);
            quote! {
                <#elem_ty as ::core::convert::TryFrom<u64>>::try_from(
                    clap_bind::parse_u64_str(&flag, element)?,
                )
                .map_err(|_| clap_bind::FlagError::parse(&flag, #ty_name, "value out of range"))?
            }
        }
        FieldKind::Float => quote! { clap_bind::parse_f64_str(&flag, element)? as #elem_ty },
        FieldKind::Str => quote! { element.clone() },
        FieldKind::Duration => quote! { clap_bind::parse_duration_str(&flag, element)? },
        FieldKind::Timestamp => {
            quote! { clap_bind::parse_timestamp_str(&flag, element, #layout)? }
        }
        FieldKind::Id => quote! { clap_bind::parse_id_str(&flag, element)? },
        FieldKind::Seq(_) | FieldKind::Structure => {
            return Err(syn::Error::new_spanned(
                &plan.ty,
                "unsupported sequence element",
            ));
        }
    };

    let assign = wrap_optional(plan, quote! { items });
    Ok(quote! {
        let raw = clap_bind::read_raw_seq(matches, &flag)?;
        let mut items: ::std::vec::Vec<#elem_ty> = ::std::vec::Vec::with_capacity(raw.len());
        for element in &raw {
            items.push(#elem_expr);
        }
        observer(&flag, &clap_bind::FieldValue::Seq(raw.clone()));
        value.#ident = #assign;
        defined = true;
    })
}

fn wrap_optional(plan: &FieldPlan, value: TokenStream) -> TokenStream {
    if plan.optional {
        quote! { ::core::option::Option::Some(#value) }
    } else {
        value
    }
}

fn layout_tokens(plan: &FieldPlan) -> TokenStream {
    plan.attrs.layout.as_ref().map_or_else(
        || quote! { ::core::option::Option::None },
        |layout| quote! { ::core::option::Option::Some(#layout) },
    )
}

fn type_name(ty: &syn::Type) -> LitStr {
    LitStr::new(&quote!(#ty).to_string(), Span::call_site())
}
