#![allow(clippy::unwrap_used)]

use std::time::Duration;

use super::*;
use crate::api::{CachedApi, LocalApi};
use crate::db::Database;
use crate::review::execute;

fn seeded_api() -> CachedApi<LocalApi> {
    let mut db = Database::open_in_memory().unwrap();
    db.seed_demo_data().unwrap();
    CachedApi::new(LocalApi::new(db, 5, Duration::ZERO))
}

/// Run everything queued, the way the worker would.
fn pump(app: &mut App, api: &mut CachedApi<LocalApi>) {
    for request in app.take_requests() {
        match request {
            Request::ClearCache => api.clear(),
            Request::Fetch(plan) => {
                let outcome = execute(&plan, api);
                app.apply_outcome(outcome);
            }
        }
    }
}

fn loaded_app(api: &mut CachedApi<LocalApi>) -> App {
    let mut app = App::new();
    app.load_all();
    pump(&mut app, api);
    app
}

#[test]
fn test_new_app_has_no_choices_until_directory_loads() {
    let app = App::new();
    assert!(app.employee_choices().is_empty());
}

#[test]
fn test_initial_load() {
    let mut api = seeded_api();
    let app = loaded_app(&mut api);
    assert_eq!(app.ledger.pending().len(), 5);
    let choices = app.employee_choices();
    assert_eq!(choices.len(), 10);
    assert!(choices[0].is_empty());
    assert_eq!(choices[1].full_name(), "James Smith");
    assert_eq!(app.status_message, "5 pending");
}

#[test]
fn test_select_employee_replaces_pending() {
    let mut api = seeded_api();
    let mut app = loaded_app(&mut api);
    let mary = Employee::new("emp-mary-johnson", "Mary", "Johnson");
    app.select_employee(&mary);
    assert!(app.switch.is_loading());
    pump(&mut app, &mut api);
    assert!(!app.ledger.pending().is_empty());
    assert!(app
        .ledger
        .pending()
        .iter()
        .all(|t| t.employee.id == "emp-mary-johnson"));
}

#[test]
fn test_approve_and_decline_first() {
    let mut api = seeded_api();
    let mut app = loaded_app(&mut api);
    let head = app.ledger.pending()[0].id.clone();
    app.approve_first();
    assert_eq!(app.ledger.approved()[0].id, head);
    assert!(app.status_message.starts_with("Approved"));

    let next = app.ledger.pending()[0].id.clone();
    app.decline_first();
    assert_eq!(app.ledger.declined()[0].id, next);
    assert_eq!(app.ledger.pending().len(), 3);
}

#[test]
fn test_actions_on_empty_pending_report_nothing() {
    let mut app = App::new();
    app.approve_first();
    assert_eq!(app.status_message, "Nothing to approve");
    app.decline_first();
    assert_eq!(app.status_message, "Nothing to decline");
    app.approve("missing");
    assert_eq!(app.status_message, "No pending transaction missing");
}

#[test]
fn test_view_more_then_reload_keeps_decisions() {
    let mut api = seeded_api();
    let mut app = loaded_app(&mut api);
    app.approve_first();
    app.view_more();
    pump(&mut app, &mut api);
    assert_eq!(app.ledger.pending().len(), 9);
    assert_eq!(app.status_message, "9 pending (1 already reviewed)");

    app.load_all();
    pump(&mut app, &mut api);
    assert_eq!(app.ledger.pending().len(), 4);
    assert_eq!(app.ledger.approved().len(), 1);
}

#[test]
fn test_view_more_without_cursor() {
    let mut app = App::new();
    app.view_more();
    assert!(app.take_requests().is_empty());
    assert_eq!(app.status_message, "No more transactions to load");
}

#[test]
fn test_refresh_clears_cache_first() {
    let mut api = seeded_api();
    let mut app = loaded_app(&mut api);
    app.refresh();
    let requests = app.take_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], Request::ClearCache);
    assert!(matches!(requests[1], Request::Fetch(_)));
}

#[test]
fn test_stale_outcome_leaves_status_alone() {
    let mut api = seeded_api();
    let mut app = App::new();
    app.load_all();
    let stale = app.take_requests();
    app.select_employee(&Employee::new("emp-james-smith", "James", "Smith"));
    for request in stale {
        if let Request::Fetch(plan) = request {
            app.apply_outcome(execute(&plan, &mut api));
        }
    }
    assert!(app.ledger.pending().is_empty());
    assert_eq!(app.status_message, "Loading transactions for James Smith");
}

#[test]
fn test_dispatch_failure_reported() {
    let mut app = App::new();
    app.load_all();
    app.dispatch_failed(&FetchError::WorkerGone);
    assert!(!app.switch.is_loading());
    assert_eq!(app.status_message, "Load failed: Data worker is not running");
}

#[test]
fn test_restore_selected() {
    let mut api = seeded_api();
    let mut app = loaded_app(&mut api);
    app.decline_first();
    app.decline_first();
    app.screen = Screen::Declined;
    app.declined_cursor.index = 1;
    let second = app.ledger.declined()[1].id.clone();
    app.restore_selected();
    assert_eq!(app.ledger.declined().len(), 1);
    assert_eq!(app.ledger.pending().last().unwrap().id, second);
    assert_eq!(app.declined_cursor.index, 0);
}

#[test]
fn test_restore_selected_on_empty() {
    let mut app = App::new();
    app.restore_selected();
    assert_eq!(app.status_message, "Nothing to restore");
}

#[test]
fn test_cursor_follows_screen() {
    let mut api = seeded_api();
    let mut app = loaded_app(&mut api);
    let (cursor, len) = app.current_cursor_mut();
    cursor.down(len, 10);
    assert_eq!(app.cursor(Screen::Review).index, 1);
    app.screen = Screen::Approved;
    let (_, len) = app.current_cursor_mut();
    assert_eq!(len, 0);
}
