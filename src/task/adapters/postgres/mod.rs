//! `PostgreSQL` adapter for the task ledger.

mod models;
mod repository;

pub use repository::PostgresTaskLedger;

#[cfg(test)]
pub(crate) use models::TaskRow;
#[cfg(test)]
pub(crate) use repository::{row_to_task, tally_counts};
