//! Unified error codes for the ordering platform
//!
//! This module defines all error codes used by order-server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors
//! - 7xxx: Restaurant / location errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Preview order not found (missing or already converted)
    PreviewOrderNotFound = 4101,
    /// Unknown order status
    InvalidOrderStatus = 4102,
    /// Order item is invalid (quantity, price)
    OrderItemInvalid = 4103,

    // ==================== 5xxx: Payment ====================
    /// Transaction token missing
    TransactionTokenMissing = 5101,

    // ==================== 6xxx: Menu ====================
    /// Menu not found
    MenuNotFound = 6001,
    /// Menu slug already used at this restaurant
    MenuSlugExists = 6002,
    /// Category not found
    CategoryNotFound = 6101,

    // ==================== 7xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 7001,
    /// Location not found
    LocationNotFound = 7101,
    /// Origin not found
    OriginNotFound = 7201,
    /// No stations configured
    StationNotFound = 7301,

    // ==================== 8xxx: User ====================
    /// Neither email nor phone number supplied
    UserContactRequired = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::PreviewOrderNotFound => "Preview order not found",
            ErrorCode::InvalidOrderStatus => "Invalid order status",
            ErrorCode::OrderItemInvalid => "Order item is invalid",

            // Payment
            ErrorCode::TransactionTokenMissing => "Transaction token is required",

            // Menu
            ErrorCode::MenuNotFound => "Menu not found",
            ErrorCode::MenuSlugExists => "Menu slug already exists",
            ErrorCode::CategoryNotFound => "Category not found",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::LocationNotFound => "Location not found",
            ErrorCode::OriginNotFound => "Origin not found",
            ErrorCode::StationNotFound => "No stations found",

            // User
            ErrorCode::UserContactRequired => "Either email or phone number is required",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4101 => Ok(ErrorCode::PreviewOrderNotFound),
            4102 => Ok(ErrorCode::InvalidOrderStatus),
            4103 => Ok(ErrorCode::OrderItemInvalid),

            // Payment
            5101 => Ok(ErrorCode::TransactionTokenMissing),

            // Menu
            6001 => Ok(ErrorCode::MenuNotFound),
            6002 => Ok(ErrorCode::MenuSlugExists),
            6101 => Ok(ErrorCode::CategoryNotFound),

            // Restaurant
            7001 => Ok(ErrorCode::RestaurantNotFound),
            7101 => Ok(ErrorCode::LocationNotFound),
            7201 => Ok(ErrorCode::OriginNotFound),
            7301 => Ok(ErrorCode::StationNotFound),

            // User
            8002 => Ok(ErrorCode::UserContactRequired),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
