use std::collections::HashSet;

use crate::models::Transaction;

#[derive(Debug, Default, Clone)]
pub(crate) struct Ledger {
    pending: Vec<Transaction>,
    approved: Vec<Transaction>,
    declined: Vec<Transaction>,
}

impl Ledger {
    pub(crate) fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub(crate) fn approved(&self) -> &[Transaction] {
        &self.approved
    }

    pub(crate) fn declined(&self) -> &[Transaction] {
        &self.declined
    }

    /// Replace pending with a freshly loaded list, leaving out anything
    /// already approved or declined. Returns how many entries were left out.
    pub(crate) fn reconcile(&mut self, loaded: &[Transaction]) -> usize {
        let decided: HashSet<&str> = self
            .approved
            .iter()
            .chain(&self.declined)
            .map(|t| t.id.as_str())
            .collect();
        let pending: Vec<Transaction> = loaded
            .iter()
            .filter(|t| !decided.contains(t.id.as_str()))
            .cloned()
            .collect();
        let skipped = loaded.len() - pending.len();
        self.pending = pending;
        skipped
    }

    pub(crate) fn approve(&mut self, id: &str) -> Option<&Transaction> {
        let txn = self.take_pending(id)?;
        self.approved.push(txn.into_approved());
        self.approved.last()
    }

    pub(crate) fn decline(&mut self, id: &str) -> Option<&Transaction> {
        let txn = self.take_pending(id)?;
        self.declined.push(txn);
        self.declined.last()
    }

    pub(crate) fn approve_first(&mut self) -> Option<&Transaction> {
        let id = self.pending.first()?.id.clone();
        self.approve(&id)
    }

    pub(crate) fn decline_first(&mut self) -> Option<&Transaction> {
        let id = self.pending.first()?.id.clone();
        self.decline(&id)
    }

    /// Put a declined transaction back at the end of pending.
    pub(crate) fn restore(&mut self, id: &str) -> Option<&Transaction> {
        let idx = self.declined.iter().position(|t| t.id == id)?;
        let txn = self.declined.remove(idx);
        self.pending.push(txn);
        self.pending.last()
    }

    fn take_pending(&mut self, id: &str) -> Option<Transaction> {
        let idx = self.pending.iter().position(|t| t.id == id)?;
        Some(self.pending.remove(idx))
    }
}
