//! Student reports.
//!
//! Reports are computed on request from the student's grades, attendance and
//! per-subject grading scales. Nothing is cached or persisted: the
//! [`aggregator`] turns fetched records into report structures, and the
//! [`store`] decides where those records come from.

pub mod aggregator;
pub mod controller;
pub mod model;
pub mod router;
pub mod service;
pub mod store;

pub use router::init_reports_router;
pub use store::{InMemoryReportStore, PgReportStore, ReportStore};
