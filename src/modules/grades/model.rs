//! Grade models, re-exported from the `schoolhub-models` crate.

pub use schoolhub_models::grades::*;
