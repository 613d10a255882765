//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::PreviewOrderNotFound
            | Self::MenuNotFound
            | Self::CategoryNotFound
            | Self::RestaurantNotFound
            | Self::LocationNotFound
            | Self::OriginNotFound
            | Self::StationNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::MenuSlugExists => StatusCode::CONFLICT,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation/business errors)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::ValueOutOfRange
            | Self::InvalidOrderStatus
            | Self::OrderItemInvalid
            | Self::TransactionTokenMissing
            | Self::UserContactRequired => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::MenuNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::PreviewOrderNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::MenuSlugExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::OrderItemInvalid.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::ValueOutOfRange.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::UserContactRequired.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::TransactionTokenMissing.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
