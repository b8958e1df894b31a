#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;

use votebox_gateway::config::{self, FileConfig};

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn resolve_with(file: FileConfig, pairs: &[(&str, &str)]) -> votebox_core::Result<config::VoteConfig> {
    let env = env_of(pairs);
    config::resolve(file, &|k: &str| env.get(k).cloned())
}

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
ballot:
  option_a: "Cats"
  optoin_b: "Dogs" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let file = config::load_from_str(ok).expect("must parse");
    assert_eq!(file.version, 1);
    assert_eq!(file.ballot.option_a, "Cats");
    assert_eq!(file.ballot.option_b, "Dogs");
    assert_eq!(file.server.listen, "0.0.0.0:8080");
}

#[test]
fn wrong_version_is_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn store_section_ranges_are_checked() {
    let bad = r#"
version: 1
store:
  pool_size: 0
"#;
    assert!(config::load_from_str(bad).is_err());

    let bad_url = r#"
version: 1
store:
  url: "http://localhost:6379"
"#;
    assert!(config::load_from_str(bad_url).is_err());

    let no_command_timeout = r#"
version: 1
store:
  command_timeout_ms: 0
"#;
    assert!(config::load_from_str(no_command_timeout).is_err());
}

#[test]
fn command_timeout_defaults_and_overrides() {
    let cfg = resolve_with(FileConfig::default(), &[]).unwrap();
    assert_eq!(cfg.store.command_timeout_ms, 2000);

    let file = config::load_from_str(
        r#"
version: 1
store:
  command_timeout_ms: 250
"#,
    )
    .unwrap();
    let cfg = resolve_with(file, &[]).unwrap();
    assert_eq!(cfg.store.command_timeout_ms, 250);
}

#[test]
fn file_values_used_without_env() {
    let file = config::load_from_str(
        r#"
version: 1
server:
  listen: "127.0.0.1:9000"
ballot:
  title: "Lunch"
  option_a: "Pizza"
  option_b: "Tacos"
store:
  url: "redis://cache:6379"
"#,
    )
    .unwrap();

    let cfg = resolve_with(file, &[]).unwrap();
    assert_eq!(cfg.listen.to_string(), "127.0.0.1:9000");
    assert_eq!(cfg.title, "Lunch");
    assert_eq!(cfg.options.a(), "Pizza");
    assert_eq!(cfg.options.b(), "Tacos");
    assert_eq!(cfg.store.url, "redis://cache:6379");
}

#[test]
fn env_overrides_file_when_non_empty() {
    let cfg = resolve_with(
        FileConfig::default(),
        &[
            ("VOTE1VALUE", "Tabs"),
            ("VOTE2VALUE", "Spaces"),
            ("TITLE", "Editor Wars"),
            ("REDIS_URL", "redis://redis-primary:6379"),
            ("VOTEBOX_LISTEN", "127.0.0.1:3000"),
        ],
    )
    .unwrap();

    assert_eq!(cfg.options.a(), "Tabs");
    assert_eq!(cfg.options.b(), "Spaces");
    assert_eq!(cfg.title, "Editor Wars");
    assert_eq!(cfg.store.url, "redis://redis-primary:6379");
    assert_eq!(cfg.listen.port(), 3000);
}

#[test]
fn empty_env_values_are_ignored() {
    let cfg = resolve_with(
        FileConfig::default(),
        &[("VOTE1VALUE", ""), ("TITLE", "   ")],
    )
    .unwrap();
    assert_eq!(cfg.options.a(), "Cats");
    assert_eq!(cfg.title, "Azure Voting App");
}

#[test]
fn show_host_replaces_title() {
    let cfg = resolve_with(
        FileConfig::default(),
        &[("SHOWHOST", "true"), ("HOSTNAME", "vote-7f9c")],
    )
    .unwrap();
    assert_eq!(cfg.title, "vote-7f9c");
}

#[test]
fn invalid_options_fail_resolution() {
    let err = resolve_with(
        FileConfig::default(),
        &[("VOTE1VALUE", "Dogs")],
    )
    .expect_err("duplicate options");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let err = resolve_with(FileConfig::default(), &[("VOTE2VALUE", "reset")])
        .expect_err("reserved name");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn bad_listen_address_fails_resolution() {
    let err = resolve_with(FileConfig::default(), &[("VOTEBOX_LISTEN", "nowhere")])
        .expect_err("bad addr");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let env = env_of(&[("VOTEBOX_CONFIG", "/nonexistent/votebox.yaml")]);
    let err = config::load_file_for(&|k: &str| env.get(k).cloned()).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}
