#![allow(clippy::unwrap_used)]

use std::time::Duration;

use rust_decimal::Decimal;

use super::*;

fn seeded_api(page_size: u32) -> LocalApi {
    let mut db = Database::open_in_memory().unwrap();
    db.seed_demo_data().unwrap();
    LocalApi::new(db, page_size, Duration::ZERO)
}

fn make_txn(id: &str) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::ONE,
        employee: Employee::new("e1", "James", "Smith"),
        merchant: "Uber".into(),
        date: "2024-01-01".into(),
        approved: false,
    }
}

/// Counts calls so cache hits are observable.
#[derive(Default)]
struct CountingSource {
    calls: usize,
    fail: bool,
}

impl DataSource for CountingSource {
    fn employees(&mut self) -> FetchResult<Vec<Employee>> {
        self.calls += 1;
        if self.fail {
            return Err(FetchError::Storage("down".into()));
        }
        Ok(vec![Employee::new("e1", "James", "Smith")])
    }

    fn transactions_paginated(&mut self, page: u32) -> FetchResult<PaginatedResponse<Vec<Transaction>>> {
        self.calls += 1;
        Ok(PaginatedResponse::new(vec![make_txn(&format!("p{page}"))], Some(page + 1)))
    }

    fn transactions_by_employee(&mut self, employee_id: &str) -> FetchResult<Vec<Transaction>> {
        self.calls += 1;
        Ok(vec![make_txn(employee_id)])
    }
}

// ── LocalApi ──────────────────────────────────────────────────

#[test]
fn test_first_page_has_cursor() {
    let mut api = seeded_api(5);
    let page = api.transactions_paginated(0).unwrap();
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.next_page, Some(1));
}

#[test]
fn test_last_page_has_no_cursor() {
    let mut api = seeded_api(5);
    let total = api.db.get_transaction_count().unwrap();
    let last = (total - 1) / 5;
    let page = api.transactions_paginated(last).unwrap();
    assert!(!page.data.is_empty());
    assert_eq!(page.next_page, None);
}

#[test]
fn test_page_past_end_is_empty() {
    let mut api = seeded_api(5);
    let page = api.transactions_paginated(1_000).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.next_page, None);
}

#[test]
fn test_pages_do_not_overlap() {
    let mut api = seeded_api(4);
    let first = api.transactions_paginated(0).unwrap();
    let second = api.transactions_paginated(1).unwrap();
    assert!(first
        .data
        .iter()
        .all(|a| second.data.iter().all(|b| a.id != b.id)));
}

#[test]
fn test_zero_page_size_is_clamped() {
    let mut api = seeded_api(0);
    assert_eq!(api.transactions_paginated(0).unwrap().data.len(), 1);
}

#[test]
fn test_by_employee_requires_id() {
    let mut api = seeded_api(5);
    assert_eq!(
        api.transactions_by_employee(""),
        Err(FetchError::EmployeeRequired)
    );
}

#[test]
fn test_by_employee_filters() {
    let mut api = seeded_api(5);
    let txns = api.transactions_by_employee("emp-mary-johnson").unwrap();
    assert!(!txns.is_empty());
    assert!(txns.iter().all(|t| t.employee.full_name() == "Mary Johnson"));
}

#[test]
fn test_employees_listed() {
    let mut api = seeded_api(5);
    assert_eq!(api.employees().unwrap().len(), 9);
}

// ── CachedApi ─────────────────────────────────────────────────

#[test]
fn test_cache_answers_repeat_requests() {
    let mut api = CachedApi::new(CountingSource::default());
    api.employees().unwrap();
    api.employees().unwrap();
    api.transactions_paginated(0).unwrap();
    api.transactions_paginated(0).unwrap();
    api.transactions_by_employee("e1").unwrap();
    api.transactions_by_employee("e1").unwrap();
    assert_eq!(api.inner().calls, 3);
}

#[test]
fn test_cache_keys_by_parameters() {
    let mut api = CachedApi::new(CountingSource::default());
    api.transactions_paginated(0).unwrap();
    api.transactions_paginated(1).unwrap();
    api.transactions_by_employee("e1").unwrap();
    api.transactions_by_employee("e2").unwrap();
    assert_eq!(api.inner().calls, 4);
}

#[test]
fn test_cache_clear_forces_refetch() {
    let mut api = CachedApi::new(CountingSource::default());
    api.employees().unwrap();
    api.clear();
    api.employees().unwrap();
    assert_eq!(api.inner().calls, 2);
}

#[test]
fn test_cache_does_not_store_failures() {
    let mut api = CachedApi::new(CountingSource {
        fail: true,
        ..Default::default()
    });
    assert!(api.employees().is_err());
    assert!(api.employees().is_err());
    assert_eq!(api.inner().calls, 2);
}

// ── Resources ─────────────────────────────────────────────────

#[test]
fn test_resource_starts_empty_and_idle() {
    let r = EmployeesResource::default();
    assert!(r.data().is_none());
    assert_eq!(r.state(), &RequestState::Idle);
}

#[test]
fn test_resource_resolve_ok() {
    let mut r = EmployeesResource::default();
    r.begin();
    assert!(r.is_loading());
    assert!(r.resolve(Ok(vec![Employee::new("e1", "James", "Smith")])));
    assert_eq!(r.data().unwrap().len(), 1);
    assert_eq!(r.state(), &RequestState::Idle);
}

#[test]
fn test_resource_failure_keeps_data() {
    let mut r = TransactionsByEmployee::default();
    r.resolve(Ok(vec![make_txn("t1")]));
    r.begin();
    assert!(!r.resolve(Err(FetchError::Storage("disk".into()))));
    assert_eq!(r.data().unwrap().len(), 1);
    assert_eq!(r.state().error(), Some("Storage error: disk"));
}

#[test]
fn test_resource_invalidate_clears_data_and_state() {
    let mut r = TransactionsByEmployee::default();
    r.resolve(Ok(vec![make_txn("t1")]));
    r.begin();
    r.invalidate();
    assert!(r.data().is_none());
    assert!(!r.is_loading());
}

#[test]
fn test_settle_only_leaves_loading() {
    let mut r = EmployeesResource::default();
    r.fail(&FetchError::WorkerGone);
    r.settle();
    assert!(r.state().error().is_some());
    r.begin();
    r.settle();
    assert_eq!(r.state(), &RequestState::Idle);
}

#[test]
fn test_reset_state_drops_failure_keeps_data() {
    let mut r = EmployeesResource::default();
    assert!(r.resolve(Ok(vec![Employee::new("e1", "James", "Smith")])));
    r.fail(&FetchError::WorkerGone);
    r.reset_state();
    assert_eq!(r.state(), &RequestState::Idle);
    assert_eq!(r.data().map(Vec::len), Some(1));
}

#[test]
fn test_paginated_next_request() {
    let mut r = PaginatedTransactions::default();
    assert_eq!(r.next_request(), Some(0));
    r.resolve_page(0, Ok(PaginatedResponse::new(vec![make_txn("a")], Some(1))));
    assert_eq!(r.next_request(), Some(1));
    r.resolve_page(1, Ok(PaginatedResponse::new(vec![make_txn("b")], None)));
    assert_eq!(r.next_request(), None);
    assert_eq!(r.next_page(), None);
}

#[test]
fn test_paginated_later_pages_accumulate() {
    let mut r = PaginatedTransactions::default();
    r.resolve_page(0, Ok(PaginatedResponse::new(vec![make_txn("a")], Some(1))));
    r.resolve_page(1, Ok(PaginatedResponse::new(vec![make_txn("b")], Some(2))));
    let ids: Vec<&str> = r.transactions().unwrap().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(r.next_page(), Some(2));
}

#[test]
fn test_paginated_first_page_replaces() {
    let mut r = PaginatedTransactions::default();
    r.resolve_page(0, Ok(PaginatedResponse::new(vec![make_txn("a")], Some(1))));
    r.resolve_page(1, Ok(PaginatedResponse::new(vec![make_txn("b")], Some(2))));
    r.resolve_page(0, Ok(PaginatedResponse::new(vec![make_txn("c")], Some(1))));
    assert_eq!(r.transactions().unwrap().len(), 1);
    assert_eq!(r.transactions().unwrap()[0].id, "c");
}

#[test]
fn test_paginated_failed_page_keeps_loaded() {
    let mut r = PaginatedTransactions::default();
    r.resolve_page(0, Ok(PaginatedResponse::new(vec![make_txn("a")], Some(1))));
    assert!(!r.resolve_page(1, Err(FetchError::Storage("x".into()))));
    assert_eq!(r.transactions().unwrap().len(), 1);
    assert_eq!(r.next_page(), Some(1));
}
