//! Per-subject grading scales used when resolving report letters.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::init_grade_configs_router;
