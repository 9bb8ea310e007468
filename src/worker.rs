use anyhow::{Context, Result};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::api::{CachedApi, DataSource, FetchError};
use crate::review::{execute, FetchOutcome, FetchPlan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Request {
    Fetch(FetchPlan),
    ClearCache,
}

pub(crate) struct Worker {
    requests: Option<Sender<Request>>,
    outcomes: Receiver<FetchOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub(crate) fn spawn<S>(mut api: CachedApi<S>) -> Result<Self>
    where
        S: DataSource + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let handle = std::thread::Builder::new()
            .name("txtriage-data".into())
            .spawn(move || {
                // FIFO; superseded plans still run and the switch drops them
                for request in request_rx {
                    match request {
                        Request::ClearCache => api.clear(),
                        Request::Fetch(plan) => {
                            let outcome = execute(&plan, &mut api);
                            if outcome_tx.send(outcome).is_err() {
                                break;
                            }
                        }
                    }
                }
                log::debug!("Data worker stopped");
            })
            .context("Failed to start data worker")?;

        Ok(Self {
            requests: Some(request_tx),
            outcomes: outcome_rx,
            handle: Some(handle),
        })
    }

    pub(crate) fn submit(&self, request: Request) -> std::result::Result<(), FetchError> {
        self.requests
            .as_ref()
            .ok_or(FetchError::WorkerGone)?
            .send(request)
            .map_err(|_| FetchError::WorkerGone)
    }

    pub(crate) fn try_recv(&self) -> Option<FetchOutcome> {
        self.outcomes.try_recv().ok()
    }

    #[cfg(test)]
    pub(crate) fn recv_timeout(&self, timeout: std::time::Duration) -> Option<FetchOutcome> {
        self.outcomes.recv_timeout(timeout).ok()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Data worker panicked");
            }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
