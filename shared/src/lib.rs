//! Shared types for the ordering platform
//!
//! Common types used by order-server and its clients: the unified error
//! system, the response envelope, domain models and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
