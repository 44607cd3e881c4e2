//! Payroll reconciliation between an HR roster and a Payroll ledger.
//!
//! This crate joins the two systems of record on the employee identifier,
//! classifies every joined row into a discrepancy bucket, aggregates per
//! department, and exports a workbook, a JSON summary and SVG charts.

#![warn(missing_docs)]

pub mod auditor;
pub mod charts;
pub mod config;
pub mod error;
pub mod insights;
pub mod loader;
pub mod logging;
pub mod models;
pub mod reconciliation;
pub mod report;
