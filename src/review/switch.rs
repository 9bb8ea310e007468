use crate::api::{
    DataSource, EmployeesResource, FetchError, FetchResult, PaginatedTransactions,
    TransactionsByEmployee,
};
use crate::models::{Employee, PaginatedResponse, Transaction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlanKind {
    LoadAll { page: u32 },
    ByEmployee { employee_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchPlan {
    pub(crate) generation: u64,
    pub(crate) kind: PlanKind,
}

#[derive(Debug)]
pub(crate) enum Loaded {
    All {
        page: u32,
        employees: FetchResult<Vec<Employee>>,
        transactions: Option<FetchResult<PaginatedResponse<Vec<Transaction>>>>,
    },
    ByEmployee(FetchResult<Vec<Transaction>>),
}

#[derive(Debug)]
pub(crate) struct FetchOutcome {
    pub(crate) generation: u64,
    pub(crate) loaded: Loaded,
}

pub(crate) fn execute<S: DataSource + ?Sized>(plan: &FetchPlan, source: &mut S) -> FetchOutcome {
    let loaded = match &plan.kind {
        PlanKind::LoadAll { page } => {
            let employees = source.employees();
            let transactions = employees
                .is_ok()
                .then(|| source.transactions_paginated(*page));
            Loaded::All {
                page: *page,
                employees,
                transactions,
            }
        }
        PlanKind::ByEmployee { employee_id } => {
            Loaded::ByEmployee(source.transactions_by_employee(employee_id))
        }
    };
    FetchOutcome {
        generation: plan.generation,
        loaded,
    }
}

/// Decides which feed is authoritative for the current employee selection.
#[derive(Debug)]
pub(crate) struct SourceSwitch {
    selection: Employee,
    generation: u64,
    employees: EmployeesResource,
    paginated: PaginatedTransactions,
    by_employee: TransactionsByEmployee,
}

impl Default for SourceSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceSwitch {
    pub(crate) fn new() -> Self {
        Self {
            selection: Employee::empty(),
            generation: 0,
            employees: EmployeesResource::default(),
            paginated: PaginatedTransactions::default(),
            by_employee: TransactionsByEmployee::default(),
        }
    }

    pub(crate) fn selection(&self) -> &Employee {
        &self.selection
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn employees(&self) -> &EmployeesResource {
        &self.employees
    }

    pub(crate) fn paginated(&self) -> &PaginatedTransactions {
        &self.paginated
    }

    pub(crate) fn by_employee(&self) -> &TransactionsByEmployee {
        &self.by_employee
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.employees.is_loading() || self.paginated.is_loading() || self.by_employee.is_loading()
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.employees
            .state()
            .error()
            .or_else(|| self.paginated.state().error())
            .or_else(|| self.by_employee.state().error())
    }

    pub(crate) fn authoritative(&self) -> Option<&[Transaction]> {
        self.paginated
            .transactions()
            .or_else(|| self.by_employee.data().map(Vec::as_slice))
    }

    /// Switch to a new employee filter. The sentinel starts the full feed over
    /// from its first page.
    pub(crate) fn select(&mut self, employee: &Employee) -> FetchPlan {
        self.selection = employee.clone();
        if employee.is_empty() {
            self.by_employee.invalidate();
            self.paginated.invalidate();
            self.load_all(0)
        } else {
            self.paginated.invalidate();
            // The directory plays no part in the employee feed
            self.employees.reset_state();
            self.by_employee.begin();
            self.issue(PlanKind::ByEmployee {
                employee_id: employee.id.clone(),
            })
        }
    }

    pub(crate) fn can_view_more(&self) -> bool {
        let employee_feed_empty = self.by_employee.data().is_some_and(|d| d.is_empty());
        !self.paginated.is_loading() && self.paginated.next_page().is_some() && !employee_feed_empty
    }

    pub(crate) fn view_more(&mut self) -> Option<FetchPlan> {
        if !self.can_view_more() {
            return None;
        }
        let page = self.paginated.next_request()?;
        self.by_employee.invalidate();
        Some(self.load_all(page))
    }

    pub(crate) fn refresh(&mut self) -> FetchPlan {
        let selection = self.selection.clone();
        self.select(&selection)
    }

    pub(crate) fn abort(&mut self, error: &FetchError) {
        self.employees.abort(error);
        self.paginated.abort(error);
        self.by_employee.abort(error);
    }

    /// Apply a finished fetch. Returns the new authoritative list when the
    /// outcome is current and succeeded; `None` leaves the ledger alone.
    pub(crate) fn complete(&mut self, outcome: FetchOutcome) -> Option<Vec<Transaction>> {
        if outcome.generation != self.generation {
            log::debug!(
                "Discarding stale response (generation {} < {})",
                outcome.generation,
                self.generation
            );
            return None;
        }

        match outcome.loaded {
            Loaded::All {
                page,
                employees,
                transactions,
            } => {
                if let Err(e) = &employees {
                    log::warn!("Employee fetch failed: {e}");
                }
                if !self.employees.resolve(employees) {
                    self.paginated.settle();
                    return None;
                }
                let Some(result) = transactions else {
                    self.paginated.settle();
                    return None;
                };
                if let Err(e) = &result {
                    log::warn!("Transaction page {page} fetch failed: {e}");
                }
                if !self.paginated.resolve_page(page, result) {
                    return None;
                }
                log::info!(
                    "Loaded page {page}; {} transactions loaded, next page {:?}",
                    self.paginated.transactions().map_or(0, <[Transaction]>::len),
                    self.paginated.next_page()
                );
            }
            Loaded::ByEmployee(result) => {
                if let Err(e) = &result {
                    log::warn!("Employee transactions fetch failed: {e}");
                }
                if !self.by_employee.resolve(result) {
                    return None;
                }
                log::info!(
                    "Loaded {} transactions for {}",
                    self.by_employee.data().map_or(0, Vec::len),
                    self.selection
                );
            }
        }

        self.authoritative().map(<[Transaction]>::to_vec)
    }

    fn load_all(&mut self, page: u32) -> FetchPlan {
        self.employees.begin();
        self.paginated.begin();
        self.issue(PlanKind::LoadAll { page })
    }

    fn issue(&mut self, kind: PlanKind) -> FetchPlan {
        self.generation += 1;
        log::info!("Issuing fetch #{}: {kind:?}", self.generation);
        FetchPlan {
            generation: self.generation,
            kind,
        }
    }
}
