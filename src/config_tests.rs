#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use super::*;

fn config(vars: &[(&str, &str)], interactive: bool) -> Result<Config> {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(Path::new("/data"), interactive, |k| env.get(k).cloned())
}

#[test]
fn test_defaults() {
    let c = config(&[], true).unwrap();
    assert_eq!(c.db_path, PathBuf::from("/data/txtriage.db"));
    assert_eq!(c.log_path, PathBuf::from("/data/txtriage.log"));
    assert_eq!(c.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(c.latency, Duration::from_millis(DEFAULT_LATENCY_MS));
    assert_eq!(c.log_filter, "info");
}

#[test]
fn test_cli_has_no_latency_by_default() {
    assert_eq!(config(&[], false).unwrap().latency, Duration::ZERO);
}

#[test]
fn test_overrides() {
    let c = config(
        &[
            ("TXTRIAGE_DB", "/tmp/other.db"),
            ("TXTRIAGE_PAGE_SIZE", " 12 "),
            ("TXTRIAGE_LATENCY_MS", "40"),
            ("TXTRIAGE_LOG", "txtriage=debug"),
        ],
        false,
    )
    .unwrap();
    assert_eq!(c.db_path, PathBuf::from("/tmp/other.db"));
    assert_eq!(c.page_size, 12);
    assert_eq!(c.latency, Duration::from_millis(40));
    assert_eq!(c.log_filter, "txtriage=debug");
}

#[test]
fn test_blank_db_path_uses_default() {
    let c = config(&[("TXTRIAGE_DB", "  ")], true).unwrap();
    assert_eq!(c.db_path, PathBuf::from("/data/txtriage.db"));
}

#[test]
fn test_zero_page_size_rejected() {
    let err = config(&[("TXTRIAGE_PAGE_SIZE", "0")], true).unwrap_err();
    assert!(err.to_string().contains("at least 1"));
}

#[test]
fn test_bad_numbers_name_the_variable() {
    let err = config(&[("TXTRIAGE_PAGE_SIZE", "five")], true).unwrap_err();
    assert!(err.to_string().contains("TXTRIAGE_PAGE_SIZE"));
    let err = config(&[("TXTRIAGE_LATENCY_MS", "-1")], true).unwrap_err();
    assert!(err.to_string().contains("TXTRIAGE_LATENCY_MS"));
}
