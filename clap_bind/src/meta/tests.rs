//! Unit tests for name-spec parsing and descriptor inference.

use rstest::rstest;

use super::{FieldMeta, NameSpec, ValueKind, resolve_alias, resolve_name, split_csv};

#[rstest]
#[case("", "", &[], false)]
#[case("name", "name", &[], false)]
#[case("name,n", "name", &["n"], false)]
#[case("name,n,omitempty", "name", &["n"], true)]
#[case(" spaced , s ", "spaced", &["s"], false)]
#[case("count,omitempty,c", "count", &["c"], true)]
#[case("name,n,A", "name", &["n", "A"], false)]
fn parses_name_specs(
    #[case] raw: &str,
    #[case] name: &str,
    #[case] aliases: &[&str],
    #[case] omit_empty: bool,
) {
    let spec = NameSpec::parse(raw);
    assert_eq!(spec.name(), name);
    let got: Vec<&str> = spec.aliases().iter().map(String::as_str).collect();
    assert_eq!(got, aliases);
    assert_eq!(spec.omit_empty(), omit_empty);
}

#[rstest]
#[case("", &[])]
#[case("   ", &[])]
#[case("alpha, beta", &["alpha", "beta"])]
#[case(" a ,b , c", &["a", "b", "c"])]
#[case("solo", &["solo"])]
fn splits_and_trims_csv(#[case] raw: &str, #[case] expected: &[&str]) {
    let parts = split_csv(raw);
    let got: Vec<&str> = parts.iter().map(String::as_str).collect();
    assert_eq!(got, expected);
}

#[test]
fn resolves_names_under_prefix() {
    assert_eq!(resolve_name("db-", "host"), "db-host");
    assert_eq!(resolve_name("", "host"), "host");
}

#[test]
fn prefixes_only_long_aliases() {
    assert_eq!(resolve_alias("db-", "hostname"), "db-hostname");
    assert_eq!(resolve_alias("db-", "h"), "h");
}

#[test]
fn required_without_default_or_omitempty() {
    let field = FieldMeta::new("host", ValueKind::Str);
    assert!(field.required());
}

#[test]
fn default_clears_required() {
    let field = FieldMeta::new("host", ValueKind::Str).default_value("localhost");
    assert!(!field.required());
}

#[test]
fn omit_empty_clears_required() {
    let field = FieldMeta::new("host,omitempty", ValueKind::Str);
    assert!(!field.required());
}

#[test]
fn empty_default_stays_required() {
    let field = FieldMeta::new("host", ValueKind::Str).default_value("");
    assert!(field.required());
}
