//! # drivebox-api
//!
//! HTTP transport for Drivebox: axum routes, bearer-token extraction, and
//! the mapping from engine errors to HTTP responses. All business rules
//! live in `drivebox-service`; handlers here only parse, delegate, and
//! render.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
