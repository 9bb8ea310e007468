mod ledger;
mod switch;

pub(crate) use ledger::Ledger;
pub(crate) use switch::{execute, FetchOutcome, FetchPlan, SourceSwitch};
#[cfg(test)]
pub(crate) use switch::{Loaded, PlanKind};
