//! # SchoolHub Core
//!
//! Core types, errors, and utilities for the SchoolHub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination parameters and response metadata
//! - [`serde`]: Lenient query-string deserializers
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::errors::AppError;
//! use schoolhub_core::pagination::{PaginationMeta, PaginationParams};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//!
//! let params = PaginationParams::default();
//! let meta = PaginationMeta::from_params(&params, 42);
//! ```

pub mod errors;
pub mod pagination;
pub mod serde;

pub use errors::{AppError, ErrorResponse};
pub use pagination::{PaginationMeta, PaginationParams};
