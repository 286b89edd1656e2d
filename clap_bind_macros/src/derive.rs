//! Implementation of the `FlagBind` derive.

mod build;
mod parse;

#[cfg(test)]
mod tests;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let fields = named_fields(input)?;
    let plans = fields
        .iter()
        .map(parse::plan_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let meta_entries: Vec<_> = plans.iter().filter_map(build::metadata_entry).collect();
    let bind_stanzas = plans
        .iter()
        .map(build::bind_stanza)
        .collect::<syn::Result<Vec<_>>>()?;
    let bind_stanzas: Vec<_> = bind_stanzas.into_iter().flatten().collect();

    let bind_impl = if bind_stanzas.is_empty() {
        quote! {
            fn bind_fields(
                _matches: &clap_bind::ArgMatches,
                _prefix: &str,
                _observer: &mut clap_bind::BindObserver<'_>,
            ) -> ::core::result::Result<::core::option::Option<Self>, clap_bind::FlagError> {
                ::core::result::Result::Ok(::core::option::Option::None)
            }
        }
    } else {
        quote! {
            fn bind_fields(
                matches: &clap_bind::ArgMatches,
                prefix: &str,
                observer: &mut clap_bind::BindObserver<'_>,
            ) -> ::core::result::Result<::core::option::Option<Self>, clap_bind::FlagError> {
                let mut value = <Self as ::core::default::Default>::default();
                let mut defined = false;
                #( #bind_stanzas )*
                if defined {
                    ::core::result::Result::Ok(::core::option::Option::Some(value))
                } else {
                    ::core::result::Result::Ok(::core::option::Option::None)
                }
            }
        }
    };

    Ok(quote! {
        impl clap_bind::FlagBind for #ident {
            fn metadata() -> clap_bind::StructMeta {
                clap_bind::StructMeta::new()
                    #( .field(#meta_entries) )*
            }

            #bind_impl
        }
    })
}

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<syn::Field>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Ok(named.named.iter().cloned().collect()),
            _ => Err(syn::Error::new_spanned(
                &data.fields,
                "FlagBind requires named fields",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            "FlagBind can only be derived for structs",
        )),
    }
}
