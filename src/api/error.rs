use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub(crate) enum FetchError {
    #[error("Employee id cannot be empty")]
    EmployeeRequired,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Data worker is not running")]
    WorkerGone,
}

impl From<anyhow::Error> for FetchError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(format!("{e:#}"))
    }
}
