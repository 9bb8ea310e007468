#![allow(clippy::unwrap_used)]

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_flag_value_present() {
    let a = args(&["--page", "2", "--employee", "mary"]);
    assert_eq!(flag_value(&a, "--page").unwrap(), Some("2"));
    assert_eq!(flag_value(&a, "--employee").unwrap(), Some("mary"));
}

#[test]
fn test_flag_value_absent() {
    assert_eq!(flag_value(&args(&["--page", "1"]), "--employee").unwrap(), None);
    assert_eq!(flag_value(&[], "--page").unwrap(), None);
}

#[test]
fn test_flag_without_value_is_usage_error() {
    let err = flag_value(&args(&["--employee"]), "--employee").unwrap_err();
    assert!(err.to_string().starts_with("Usage: txtriage transactions"));
    assert!(flag_value(&args(&["--page", "--employee", "mary"]), "--page").is_err());
}

#[test]
fn test_blank_employee_is_not_found() {
    let mut db = Database::open_in_memory().unwrap();
    db.seed_demo_data().unwrap();
    let config = Config {
        db_path: "unused.db".into(),
        log_path: "unused.log".into(),
        page_size: 5,
        latency: std::time::Duration::ZERO,
        log_filter: "info".into(),
    };
    let err = cli_transactions(&args(&["--employee", " "]), db, &config).unwrap_err();
    assert!(err.to_string().contains("not found"));
}
