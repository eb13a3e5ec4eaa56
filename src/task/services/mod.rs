//! Application services for the task ledger.

mod ledger;

pub use ledger::{TaskLedgerService, TaskLedgerServiceError, TaskLedgerServiceResult};
