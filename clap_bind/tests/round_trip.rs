//! End-to-end coverage: generate flags, parse a command line, bind back.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use clap_bind::{FlagBind, FlagError};
use uuid::Uuid;

#[derive(Debug, Default, PartialEq, FlagBind)]
struct Everything {
    #[flag(name = "verbose,v")]
    verbose: bool,
    #[flag(name = "count,c")]
    count: i32,
    #[flag(name = "limit")]
    limit: u64,
    #[flag(name = "ratio")]
    ratio: f64,
    #[flag(name = "name,n")]
    name: String,
    #[flag(name = "delay")]
    delay: Duration,
    #[flag(name = "when")]
    when: DateTime<Utc>,
    #[flag(name = "id")]
    id: Uuid,
}

#[derive(Debug, Default, PartialEq, FlagBind)]
struct Greeting {
    #[flag(name = "name,n", default = "guest", usage = "User name")]
    name: String,
    #[flag(name = "count", default = "3", usage = "How many items")]
    count: i64,
}

#[derive(Debug, Default, PartialEq, FlagBind)]
struct Derived {
    #[flag(default = "10")]
    max_count: u32,
}

#[derive(Debug, Default, PartialEq, FlagBind)]
struct Dated {
    #[flag(name = "when", layout = "%Y-%m-%d")]
    when: DateTime<Utc>,
    #[flag(name = "note", default = "none")]
    note: String,
}

#[derive(Debug, Default, PartialEq, FlagBind)]
struct MaybeCfg {
    #[flag(name = "limit,omitempty")]
    limit: Option<u32>,
}

#[test]
fn optional_fields_bind_to_some_only_when_set() {
    let cmd = clap_bind::bound_command::<MaybeCfg>("demo").expect("command");
    let matches = cmd
        .try_get_matches_from(["demo", "--limit", "5"])
        .expect("parse");
    let cfg: MaybeCfg = clap_bind::bind(&matches).expect("bind");
    assert_eq!(cfg.limit, Some(5));

    let cmd = clap_bind::bound_command::<MaybeCfg>("demo").expect("command");
    let matches = cmd.try_get_matches_from(["demo"]).expect("parse");
    let cfg: MaybeCfg = clap_bind::bind(&matches).expect("bind");
    assert_eq!(cfg.limit, None);
}

#[test]
fn scalars_round_trip() {
    let cmd = clap_bind::bound_command::<Everything>("demo").expect("command");
    let matches = cmd
        .try_get_matches_from([
            "demo",
            "--verbose",
            "--count",
            "-4",
            "--limit",
            "42",
            "--ratio",
            "2.5",
            "--name",
            "ada",
            "--delay",
            "250ms",
            "--when",
            "2025-01-02T15:04:05Z",
            "--id",
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
        ])
        .expect("parse");
    let cfg: Everything = clap_bind::bind(&matches).expect("bind");
    assert_eq!(
        cfg,
        Everything {
            verbose: true,
            count: -4,
            limit: 42,
            ratio: 2.5,
            name: "ada".to_owned(),
            delay: Duration::from_millis(250),
            when: Utc
                .with_ymd_and_hms(2025, 1, 2, 15, 4, 5)
                .single()
                .expect("timestamp"),
            id: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("uuid"),
        }
    );
}

#[test]
fn defaults_fill_unset_flags() {
    let cmd = clap_bind::bound_command::<Greeting>("demo").expect("command");
    let matches = cmd
        .try_get_matches_from(["demo", "--count", "7"])
        .expect("parse");
    let cfg: Greeting = clap_bind::bind(&matches).expect("bind");
    assert_eq!(
        cfg,
        Greeting {
            name: "guest".to_owned(),
            count: 7,
        }
    );
}

#[test]
fn short_aliases_select_the_same_flag() {
    let cmd = clap_bind::bound_command::<Greeting>("demo").expect("command");
    let matches = cmd.try_get_matches_from(["demo", "-n", "ada"]).expect("parse");
    let cfg: Greeting = clap_bind::bind(&matches).expect("bind");
    assert_eq!(cfg.name, "ada");
    assert_eq!(cfg.count, 3);
}

#[test]
fn field_names_default_to_kebab_case() {
    let cmd = clap_bind::bound_command::<Derived>("demo").expect("command");
    let matches = cmd
        .try_get_matches_from(["demo", "--max-count", "99"])
        .expect("parse");
    let cfg: Derived = clap_bind::bind(&matches).expect("bind");
    assert_eq!(cfg.max_count, 99);
}

#[test]
fn narrow_integers_reject_out_of_range_values() {
    let cmd = clap_bind::bound_command::<Derived>("demo").expect("command");
    // u64 wire value that cannot land in a u32 field
    let matches = cmd
        .try_get_matches_from(["demo", "--max-count", "4294967296"])
        .expect("parse");
    let err = clap_bind::bind::<Derived>(&matches).expect_err("out of range");
    assert!(matches!(err, FlagError::Parse { .. }), "got {err:?}");
}

#[test]
fn malformed_timestamps_abort_the_bind() {
    let cmd = clap_bind::bound_command::<Dated>("demo").expect("command");
    let matches = cmd
        .try_get_matches_from(["demo", "--when", "not-a-date"])
        .expect("parse");
    let err = clap_bind::bind::<Dated>(&matches).expect_err("bad date");
    match err {
        FlagError::Parse { name, .. } => assert_eq!(name, "when"),
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn custom_layouts_parse_dates() {
    let cmd = clap_bind::bound_command::<Dated>("demo").expect("command");
    let matches = cmd
        .try_get_matches_from(["demo", "--when", "2025-01-02"])
        .expect("parse");
    let cfg: Dated = clap_bind::bind(&matches).expect("bind");
    assert_eq!(
        cfg.when,
        Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0)
            .single()
            .expect("timestamp")
    );
    assert_eq!(cfg.note, "none");
}

#[test]
fn binding_into_replaces_the_destination() {
    let cmd = clap_bind::bound_command::<Greeting>("demo").expect("command");
    let matches = cmd
        .try_get_matches_from(["demo", "--name", "ada"])
        .expect("parse");
    let mut cfg = Greeting {
        name: "stale".to_owned(),
        count: -1,
    };
    clap_bind::bind_into(&matches, &mut cfg).expect("bind");
    assert_eq!(cfg.name, "ada");
    assert_eq!(cfg.count, 3);
}
