//! Report models, re-exported from the `schoolhub-models` crate.

pub use schoolhub_models::filters::{DateRange, RecordFilter};
pub use schoolhub_models::reports::*;
