//! The reconciliation engine.
//!
//! This module joins HR and Payroll records on employee identifier (full
//! outer join), classifies every joined row into a discrepancy bucket, and
//! aggregates per-department totals and run statistics.

mod classify;
mod department;
mod engine;
mod join;
mod statistics;

pub use classify::{PAY_TOLERANCE, classify};
pub use department::aggregate_departments;
pub use engine::{Reconciler, reconcile};
pub use join::{JoinOutcome, full_outer_join, index_by_id};
pub use statistics::compute_statistics;
