#![forbid(unsafe_code)]

//! # eoc-dashboard
//!
//! Turns a flat export of sales calls and leads into dashboard numbers: KPI
//! snapshots, day-keyed and categorical chart series, per-closer and per-setter
//! rollups, and commission totals. Every query recomputes from the full record
//! set under a [`FilterCriteria`]; nothing is cached between calls.

pub mod cohort;
pub mod commission;
pub mod dates;
pub mod directory;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod leads;
pub mod models;
pub mod report;
pub mod rollup;
pub mod series;
pub mod source;

pub use commission::{commission_for, commission_summary, UnknownEmployee};
pub use dates::parse_backend_date;
pub use directory::{EmployeeDirectory, EmployeeInfo, Role, Roster};
pub use error::DashboardError;
pub use filter::{filter_records, filter_values};
pub use kpi::calculate_kpis;
pub use models::{
    CallRow, CategoryPoint, CommissionSummary, DashboardView, DatePoint, FilterCriteria,
    FilterValues, KpiSnapshot, LeadSummary, Record, RollupRow,
};
pub use report::{build_report, build_view};
