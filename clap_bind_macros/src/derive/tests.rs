//! Unit tests for attribute parsing, type classification, and expansion.

use rstest::rstest;
use syn::parse::Parser as _;
use syn::{DeriveInput, Type, parse_quote};

use super::parse::{FieldKind, classify, parse_field_attrs, plan_field};

#[rstest]
#[case(parse_quote!(bool), FieldKind::Bool)]
#[case(parse_quote!(i32), FieldKind::Int)]
#[case(parse_quote!(u16), FieldKind::Uint)]
#[case(parse_quote!(f64), FieldKind::Float)]
#[case(parse_quote!(String), FieldKind::Str)]
#[case(parse_quote!(std::time::Duration), FieldKind::Duration)]
#[case(parse_quote!(chrono::DateTime<chrono::Utc>), FieldKind::Timestamp)]
#[case(parse_quote!(uuid::Uuid), FieldKind::Id)]
#[case(parse_quote!(DbConfig), FieldKind::Structure)]
fn classifies_scalars(#[case] ty: Type, #[case] expected: FieldKind) {
    assert_eq!(classify(&ty), expected);
}

#[test]
fn classifies_sequences_and_options() {
    assert_eq!(
        classify(&parse_quote!(Vec<String>)),
        FieldKind::Seq(Box::new(FieldKind::Str))
    );
    assert_eq!(
        classify(&parse_quote!(Vec<Vec<i64>>)),
        FieldKind::Seq(Box::new(FieldKind::Seq(Box::new(FieldKind::Int))))
    );
    // optionality is orthogonal to the value kind
    assert_eq!(classify(&parse_quote!(Option<u64>)), FieldKind::Uint);
}

#[test]
fn collects_flag_attributes() {
    let field: syn::Field = syn::Field::parse_named
        .parse2(quote::quote! {
            #[flag(name = "count,c,omitempty", default = "3", usage = "How many")]
            count: i64
        })
        .expect("parse field");
    let attrs = parse_field_attrs(&field.attrs).expect("attrs");
    assert_eq!(attrs.name.as_deref(), Some("count,c,omitempty"));
    assert_eq!(attrs.default.as_deref(), Some("3"));
    assert_eq!(attrs.usage.as_deref(), Some("How many"));
    assert!(!attrs.flatten);
}

#[test]
fn rejects_unknown_attribute_keys() {
    let field: syn::Field = syn::Field::parse_named
        .parse2(quote::quote! {
            #[flag(nmae = "typo")]
            count: i64
        })
        .expect("parse field");
    assert!(parse_field_attrs(&field.attrs).is_err());
}

#[test]
fn derives_kebab_case_names() {
    let field: syn::Field = syn::Field::parse_named
        .parse2(quote::quote! { max_count: u32 })
        .expect("parse field");
    let plan = plan_field(&field).expect("plan");
    assert_eq!(plan.spec, "max-count");
}

#[test]
fn rejects_flatten_with_prefix() {
    let field: syn::Field = syn::Field::parse_named
        .parse2(quote::quote! {
            #[flag(flatten, prefix = "db-")]
            db: DbConfig
        })
        .expect("parse field");
    assert!(plan_field(&field).is_err());
}

#[test]
fn rejects_flatten_on_scalars() {
    let field: syn::Field = syn::Field::parse_named
        .parse2(quote::quote! {
            #[flag(flatten)]
            count: i64
        })
        .expect("parse field");
    assert!(plan_field(&field).is_err());
}

#[test]
fn rejects_sequences_of_structures() {
    let field: syn::Field = syn::Field::parse_named
        .parse2(quote::quote! { subs: Vec<DbConfig> })
        .expect("parse field");
    assert!(plan_field(&field).is_err());
}

#[test]
fn expands_structs_with_named_fields() {
    let input: DeriveInput = parse_quote! {
        struct Config {
            #[flag(name = "name,n", default = "guest")]
            name: String,
            count: i64,
        }
    };
    let expanded = super::expand(&input).expect("expand").to_string();
    assert!(expanded.contains("FieldMeta"));
    assert!(expanded.contains("bind_fields"));
}

#[test]
fn rejects_tuple_structs() {
    let input: DeriveInput = parse_quote! {
        struct Pair(String, i64);
    };
    assert!(super::expand(&input).is_err());
}
