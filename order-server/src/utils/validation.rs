//! Request validation helpers
//!
//! Payload types derive [`validator::Validate`]; handlers either call
//! [`validate_payload`] or extract with [`ValidatedJson`].

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::utils::AppError;

/// Run the derived validation rules, mapping failures to a 400
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(validation_error)
}

/// Convert validator errors into an `AppError` carrying the failing fields
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields = Vec::new();
    collect_fields("", &errors, &mut fields);
    fields.sort();

    let message = match fields.first() {
        Some(first) => format!("Invalid field: {}", first),
        None => "Validation failed".to_string(),
    };
    AppError::validation(message).with_detail(
        "fields",
        Value::Array(fields.into_iter().map(Value::String).collect()),
    )
}

fn collect_fields(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(_) => out.push(path),
            ValidationErrorsKind::Struct(inner) => collect_fields(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_fields(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

/// JSON extractor that also runs `Validate`
///
/// 反序列化失败时返回 400 (统一错误信封)，而不是 axum 默认的纯文本。
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::invalid_request(rejection.body_text()))?;
        validate_payload(&value)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CreateOrderRequest, OrderItemInput};

    fn item(price: i64, quantity: i64) -> OrderItemInput {
        OrderItemInput {
            id: "1".into(),
            menu_item_id: "m1".into(),
            name: "Burger".into(),
            price,
            quantity,
            notes: None,
            modifiers: vec![],
            variants: vec![],
            station_tags: vec![],
        }
    }

    fn order(items: Vec<OrderItemInput>) -> CreateOrderRequest {
        CreateOrderRequest {
            restaurant_id: "r1".into(),
            location_id: "l1".into(),
            location_slug: String::new(),
            origin: Default::default(),
            customer: Default::default(),
            items,
            get_sms: false,
            payment_id: None,
            transaction_details: None,
            discount: None,
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        let err = validate_payload(&order(vec![])).unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid field: items");
    }

    #[test]
    fn test_nested_item_errors_are_reported_with_path() {
        let err = validate_payload(&order(vec![item(499, 1), item(-5, 0)])).unwrap_err();
        let fields = err.details.unwrap()["fields"].clone();
        let fields: Vec<String> = serde_json::from_value(fields).unwrap();
        assert!(fields.contains(&"items[1].price".to_string()));
        assert!(fields.contains(&"items[1].quantity".to_string()));
    }

    #[test]
    fn test_valid_order_passes() {
        assert!(validate_payload(&order(vec![item(499, 2)])).is_ok());
    }
}
