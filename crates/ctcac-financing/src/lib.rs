//! Financing-cost extraction for CTCAC tax-credit application workbooks.
//!
//! The pipeline is linear: [`fetch`] collects workbooks, [`financing`]
//! extracts and validates each one, and [`financing::report`] writes the
//! cross-application summary.

pub mod config;
pub mod error;
pub mod fetch;
pub mod financing;
pub mod telemetry;
