//! Data models
//!
//! Shared between order-server and clients (via API).
//! Stored documents carry their string id in `_id`; timestamps are Unix millis.

pub mod auth;
pub mod campaign;
pub mod menu;
pub mod multilingual;
pub mod order;
pub mod payment;
pub mod report;
pub mod restaurant;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use auth::*;
pub use campaign::*;
pub use menu::*;
pub use multilingual::*;
pub use order::*;
pub use payment::*;
pub use report::*;
pub use restaurant::*;
pub use user::*;
