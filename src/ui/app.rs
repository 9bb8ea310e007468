use crate::api::FetchError;
use crate::models::{Employee, Transaction};
use crate::review::{FetchOutcome, Ledger, SourceSwitch};
use crate::ui::util::ListCursor;
use crate::worker::Request;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Review,
    Approved,
    Declined,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Review, Self::Approved, Self::Declined]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Review => write!(f, "Review"),
            Self::Approved => write!(f, "Approved"),
            Self::Declined => write!(f, "Declined"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Picker,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Picker => write!(f, "FILTER"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) switch: SourceSwitch,
    pub(crate) ledger: Ledger,

    pub(crate) review_cursor: ListCursor,
    pub(crate) approved_cursor: ListCursor,
    pub(crate) declined_cursor: ListCursor,

    // Employee filter picker
    pub(crate) picker_index: usize,

    // Fetches waiting to be handed to the worker
    outbox: Vec<Request>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Review,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            switch: SourceSwitch::new(),
            ledger: Ledger::default(),

            review_cursor: ListCursor::default(),
            approved_cursor: ListCursor::default(),
            declined_cursor: ListCursor::default(),

            picker_index: 0,

            outbox: Vec::new(),

            visible_rows: 20,
        }
    }

    // ── Loading ───────────────────────────────────────────────

    pub(crate) fn employee_choices(&self) -> Vec<Employee> {
        match self.switch.employees().data() {
            None => Vec::new(),
            Some(employees) => std::iter::once(Employee::empty())
                .chain(employees.iter().cloned())
                .collect(),
        }
    }

    pub(crate) fn load_all(&mut self) {
        self.select_employee(&Employee::empty());
    }

    pub(crate) fn select_employee(&mut self, employee: &Employee) {
        let plan = self.switch.select(employee);
        self.outbox.push(Request::Fetch(plan));
        self.set_status(format!("Loading transactions for {employee}"));
    }

    pub(crate) fn view_more(&mut self) {
        match self.switch.view_more() {
            Some(plan) => {
                self.outbox.push(Request::Fetch(plan));
                self.set_status("Loading more transactions");
            }
            None => self.set_status("No more transactions to load"),
        }
    }

    pub(crate) fn refresh(&mut self) {
        self.outbox.push(Request::ClearCache);
        let plan = self.switch.refresh();
        self.outbox.push(Request::Fetch(plan));
        self.set_status(format!("Refreshing {}", self.switch.selection()));
    }

    pub(crate) fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn dispatch_failed(&mut self, error: &FetchError) {
        self.switch.abort(error);
        self.set_status(format!("Load failed: {error}"));
    }

    pub(crate) fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match self.switch.complete(outcome) {
            Some(list) => {
                let skipped = self.ledger.reconcile(&list);
                self.clamp_cursors();
                let shown = self.ledger.pending().len();
                self.set_status(if skipped > 0 {
                    format!("{shown} pending ({skipped} already reviewed)")
                } else {
                    format!("{shown} pending")
                });
            }
            None => {
                if let Some(err) = self.switch.error() {
                    let msg = format!("Load failed: {err}");
                    self.set_status(msg);
                }
            }
        }
    }

    // ── Review actions ────────────────────────────────────────

    pub(crate) fn approve_first(&mut self) {
        let msg = match self.ledger.approve_first() {
            Some(t) => format!("Approved {} ({})", t.merchant, t.id),
            None => "Nothing to approve".to_string(),
        };
        self.after_review(msg);
    }

    pub(crate) fn decline_first(&mut self) {
        let msg = match self.ledger.decline_first() {
            Some(t) => format!("Declined {} ({})", t.merchant, t.id),
            None => "Nothing to decline".to_string(),
        };
        self.after_review(msg);
    }

    pub(crate) fn approve(&mut self, id: &str) {
        let msg = match self.ledger.approve(id) {
            Some(t) => format!("Approved {} ({})", t.merchant, t.id),
            None => format!("No pending transaction {id}"),
        };
        self.after_review(msg);
    }

    pub(crate) fn decline(&mut self, id: &str) {
        let msg = match self.ledger.decline(id) {
            Some(t) => format!("Declined {} ({})", t.merchant, t.id),
            None => format!("No pending transaction {id}"),
        };
        self.after_review(msg);
    }

    pub(crate) fn restore(&mut self, id: &str) {
        let msg = match self.ledger.restore(id) {
            Some(t) => format!("Restored {} ({}) to pending", t.merchant, t.id),
            None => format!("No declined transaction {id}"),
        };
        self.after_review(msg);
    }

    /// Restore the declined transaction under the cursor.
    pub(crate) fn restore_selected(&mut self) {
        let id = self
            .ledger
            .declined()
            .get(self.declined_cursor.index)
            .map(|t| t.id.clone());
        match id {
            Some(id) => self.restore(&id),
            None => self.set_status("Nothing to restore"),
        }
    }

    fn after_review(&mut self, msg: String) {
        self.clamp_cursors();
        self.set_status(msg);
    }

    // ── Lists ─────────────────────────────────────────────────

    pub(crate) fn list(&self, screen: Screen) -> &[Transaction] {
        match screen {
            Screen::Review => self.ledger.pending(),
            Screen::Approved => self.ledger.approved(),
            Screen::Declined => self.ledger.declined(),
        }
    }

    pub(crate) fn cursor(&self, screen: Screen) -> ListCursor {
        match screen {
            Screen::Review => self.review_cursor,
            Screen::Approved => self.approved_cursor,
            Screen::Declined => self.declined_cursor,
        }
    }

    pub(crate) fn current_cursor_mut(&mut self) -> (&mut ListCursor, usize) {
        let len = self.list(self.screen).len();
        let cursor = match self.screen {
            Screen::Review => &mut self.review_cursor,
            Screen::Approved => &mut self.approved_cursor,
            Screen::Declined => &mut self.declined_cursor,
        };
        (cursor, len)
    }

    fn clamp_cursors(&mut self) {
        self.review_cursor.clamp(self.ledger.pending().len());
        self.approved_cursor.clamp(self.ledger.approved().len());
        self.declined_cursor.clamp(self.ledger.declined().len());
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
