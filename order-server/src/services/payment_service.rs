//! Payment Service - 模拟支付处理
//!
//! 没有真实的支付网关：发起交易只生成 token，完成交易时总是批准。
//! 预览单通过原子领取转换为订单，同一个预览单最多生成一个订单。

use serde_json::json;
use shared::models::{
    CompleteTransactionRequest, CompleteTransactionResponse, PaymentResult, PlaceOrderResponse,
    StartTransactionResponse, TransactionDetails, TransactionOutcome,
};
use shared::util::prefixed_hex_id;

use crate::services::order_service::{OrderService, PaymentStamp};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Payment status reported for orders placed without payment
pub const PAYMENT_NOT_REQUIRED: &str = "not_required";

#[derive(Clone)]
pub struct PaymentService {
    orders: OrderService,
}

impl PaymentService {
    pub fn new(orders: OrderService) -> Self {
        Self { orders }
    }

    /// Issue a transaction token for the payment widget
    pub fn start_transaction(&self, restaurant_id: &str) -> StartTransactionResponse {
        let response = StartTransactionResponse {
            transaction_token: prefixed_hex_id("TXN", 16),
            external_transaction_id: prefixed_hex_id("EXT", 12),
        };
        tracing::info!(
            restaurant_id = %restaurant_id,
            external_transaction_id = %response.external_transaction_id,
            "Transaction started"
        );
        response
    }

    /// Charge a preview and turn it into an order
    pub async fn complete_transaction(
        &self,
        request: CompleteTransactionRequest,
    ) -> AppResult<CompleteTransactionResponse> {
        let preview_id = non_empty(request.preview_order_id)
            .ok_or_else(|| AppError::invalid_request("previewOrderId is required"))?;
        let token = non_empty(request.transaction_token)
            .ok_or_else(|| AppError::new(ErrorCode::TransactionTokenMissing))?;

        let preview = self.orders.claim_preview(&preview_id).await?;
        let payment = process_payment(&token);

        let details = TransactionDetails {
            transaction_token: token,
            transaction_id: payment.transaction_id.clone(),
            status: payment.status.clone(),
            amount_cents: preview.total_price_cents,
        };
        let stamp = PaymentStamp {
            payment_id: Some(payment.transaction_id.clone()),
            transaction_details: serde_json::to_value(&details)
                .map_err(|e| AppError::internal(e.to_string()))?,
        };
        let order = self.orders.order_from_preview(preview, stamp).await?;
        tracing::info!(
            order_id = %order.id,
            transaction_id = %payment.transaction_id,
            "Transaction completed"
        );

        Ok(CompleteTransactionResponse {
            transaction: TransactionOutcome {
                result_message: payment.message,
                result_status: payment.status,
            },
            order_id: order.order_id,
        })
    }

    /// Place a preview as a cash order
    pub async fn place_without_payment(
        &self,
        preview_order_id: Option<String>,
    ) -> AppResult<PlaceOrderResponse> {
        let preview_id = non_empty(preview_order_id)
            .ok_or_else(|| AppError::invalid_request("previewOrderId is required"))?;

        let stamp = PaymentStamp {
            payment_id: None,
            transaction_details: json!({ "paymentMethod": "cash" }),
        };
        let order = self.orders.place_from_preview(&preview_id, stamp).await?;

        Ok(PlaceOrderResponse {
            order_id: order.order_id,
            status: order.status,
            payment_status: PAYMENT_NOT_REQUIRED.to_string(),
        })
    }
}

/// Mock processor, always approves
fn process_payment(transaction_token: &str) -> PaymentResult {
    tracing::debug!(token = %transaction_token, "Processing mock payment");
    PaymentResult {
        status: "Approved".to_string(),
        transaction_id: prefixed_hex_id("PAY", 12),
        message: "Transaction approved".to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_payment_approves() {
        let result = process_payment("TXN-1");
        assert_eq!(result.status, "Approved");
        assert!(result.transaction_id.starts_with("PAY-"));
        assert_eq!(result.transaction_id.len(), 4 + 12);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some("PREV-1".into())), Some("PREV-1".into()));
    }
}
