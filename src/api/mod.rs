mod cache;
mod error;
mod resources;

use std::time::Duration;

use crate::db::Database;
use crate::models::{Employee, PaginatedResponse, Transaction};

pub(crate) use cache::CachedApi;
pub(crate) use error::FetchError;
pub(crate) use resources::{
    EmployeesResource, PaginatedTransactions, RequestState, TransactionsByEmployee,
};

pub(crate) type FetchResult<T> = std::result::Result<T, FetchError>;

pub(crate) trait DataSource {
    fn employees(&mut self) -> FetchResult<Vec<Employee>>;

    fn transactions_paginated(&mut self, page: u32) -> FetchResult<PaginatedResponse<Vec<Transaction>>>;

    fn transactions_by_employee(&mut self, employee_id: &str) -> FetchResult<Vec<Transaction>>;
}

pub(crate) struct LocalApi {
    db: Database,
    page_size: u32,
    latency: Duration,
}

impl LocalApi {
    pub(crate) fn new(db: Database, page_size: u32, latency: Duration) -> Self {
        Self {
            db,
            page_size: page_size.max(1),
            latency,
        }
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
    }
}

impl DataSource for LocalApi {
    fn employees(&mut self) -> FetchResult<Vec<Employee>> {
        self.simulate_latency();
        Ok(self.db.get_employees()?)
    }

    fn transactions_paginated(&mut self, page: u32) -> FetchResult<PaginatedResponse<Vec<Transaction>>> {
        self.simulate_latency();
        let total = self.db.get_transaction_count()?;
        let offset = page.saturating_mul(self.page_size);
        if offset >= total {
            return Ok(PaginatedResponse::new(Vec::new(), None));
        }
        let data = self.db.get_transactions_page(offset, self.page_size)?;
        let next_page = (offset.saturating_add(self.page_size) < total).then_some(page + 1);
        Ok(PaginatedResponse::new(data, next_page))
    }

    fn transactions_by_employee(&mut self, employee_id: &str) -> FetchResult<Vec<Transaction>> {
        self.simulate_latency();
        if employee_id.is_empty() {
            return Err(FetchError::EmployeeRequired);
        }
        Ok(self.db.get_transactions_by_employee(employee_id)?)
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
