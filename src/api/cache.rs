use std::collections::HashMap;

use super::{DataSource, FetchResult};
use crate::models::{Employee, PaginatedResponse, Transaction};

/// Answers repeated requests from memory.
pub(crate) struct CachedApi<S> {
    inner: S,
    employees: Option<Vec<Employee>>,
    pages: HashMap<u32, PaginatedResponse<Vec<Transaction>>>,
    by_employee: HashMap<String, Vec<Transaction>>,
}

impl<S: DataSource> CachedApi<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self {
            inner,
            employees: None,
            pages: HashMap::new(),
            by_employee: HashMap::new(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.employees = None;
        self.pages.clear();
        self.by_employee.clear();
        log::debug!("Response cache cleared");
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DataSource> DataSource for CachedApi<S> {
    fn employees(&mut self) -> FetchResult<Vec<Employee>> {
        if let Some(cached) = &self.employees {
            log::debug!("cache hit: employees");
            return Ok(cached.clone());
        }
        let fresh = self.inner.employees()?;
        self.employees = Some(fresh.clone());
        Ok(fresh)
    }

    fn transactions_paginated(&mut self, page: u32) -> FetchResult<PaginatedResponse<Vec<Transaction>>> {
        if let Some(cached) = self.pages.get(&page) {
            log::debug!("cache hit: paginatedTransactions page={page}");
            return Ok(cached.clone());
        }
        let fresh = self.inner.transactions_paginated(page)?;
        self.pages.insert(page, fresh.clone());
        Ok(fresh)
    }

    fn transactions_by_employee(&mut self, employee_id: &str) -> FetchResult<Vec<Transaction>> {
        if let Some(cached) = self.by_employee.get(employee_id) {
            log::debug!("cache hit: transactionsByEmployee employee={employee_id}");
            return Ok(cached.clone());
        }
        let fresh = self.inner.transactions_by_employee(employee_id)?;
        self.by_employee
            .insert(employee_id.to_string(), fresh.clone());
        Ok(fresh)
    }
}
