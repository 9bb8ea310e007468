use super::{FetchError, FetchResult};
use crate::models::{Employee, PaginatedResponse, Transaction};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum RequestState {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

impl RequestState {
    pub(crate) fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub(crate) fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Resource<T> {
    data: Option<T>,
    state: RequestState,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: None,
            state: RequestState::Idle,
        }
    }
}

pub(crate) type EmployeesResource = Resource<Vec<Employee>>;
pub(crate) type PaginatedTransactions = Resource<PaginatedResponse<Vec<Transaction>>>;
pub(crate) type TransactionsByEmployee = Resource<Vec<Transaction>>;

impl<T> Resource<T> {
    pub(crate) fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub(crate) fn state(&self) -> &RequestState {
        &self.state
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub(crate) fn begin(&mut self) {
        self.state = RequestState::Loading;
    }

    pub(crate) fn settle(&mut self) {
        if self.state.is_loading() {
            self.state = RequestState::Idle;
        }
    }

    pub(crate) fn reset_state(&mut self) {
        self.state = RequestState::Idle;
    }

    pub(crate) fn fail(&mut self, error: &FetchError) {
        self.state = RequestState::Failed(error.to_string());
    }

    pub(crate) fn abort(&mut self, error: &FetchError) {
        if self.state.is_loading() {
            self.fail(error);
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.data = None;
        self.state = RequestState::Idle;
    }

    pub(crate) fn resolve(&mut self, result: FetchResult<T>) -> bool {
        match result {
            Ok(value) => {
                self.data = Some(value);
                self.state = RequestState::Idle;
                true
            }
            Err(e) => {
                self.fail(&e);
                false
            }
        }
    }
}

impl PaginatedTransactions {
    pub(crate) fn next_request(&self) -> Option<u32> {
        match &self.data {
            None => Some(0),
            Some(loaded) => loaded.next_page,
        }
    }

    pub(crate) fn next_page(&self) -> Option<u32> {
        self.data.as_ref().and_then(|d| d.next_page)
    }

    pub(crate) fn transactions(&self) -> Option<&[Transaction]> {
        self.data.as_ref().map(|d| d.data.as_slice())
    }

    /// Store a fetched page. The first page replaces what was loaded; later
    /// pages are appended.
    pub(crate) fn resolve_page(
        &mut self,
        page: u32,
        result: FetchResult<PaginatedResponse<Vec<Transaction>>>,
    ) -> bool {
        if page == 0 || self.data.is_none() {
            return self.resolve(result);
        }
        match result {
            Ok(later) => {
                if let Some(loaded) = self.data.as_mut() {
                    loaded.extend(later);
                }
                self.state = RequestState::Idle;
                true
            }
            Err(e) => {
                self.fail(&e);
                false
            }
        }
    }
}
