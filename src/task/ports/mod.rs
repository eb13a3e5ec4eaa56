//! Port contracts for the task ledger.

pub mod ledger;

pub use ledger::{TaskLedger, TaskLedgerError, TaskLedgerResult};
