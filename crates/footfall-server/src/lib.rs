//! # footfall-server
//!
//! HTTP boundary for the Footfall analytics service: route handlers,
//! bearer-token middleware, request logging, and the error-to-status
//! mapping. All aggregation correctness lives in `footfall-storage`;
//! this crate only validates parameters, dispatches, and serializes.

pub mod errors;
pub mod handlers;
pub mod middleware;

pub use errors::{ApiError, ApiResult};
