//! Payment DTOs (mock processor)

use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

/// `POST /payments/start-transaction/{restaurantId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTransactionResponse {
    pub transaction_token: String,
    pub external_transaction_id: String,
}

/// `POST /payments/complete-transaction`
///
/// 字段可缺省，缺失时由 handler 返回 400 而不是反序列化错误。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTransactionRequest {
    #[serde(default)]
    pub preview_order_id: Option<String>,
    #[serde(default)]
    pub transaction_token: Option<String>,
}

/// Result of the payment processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub status: String,
    pub transaction_id: String,
    pub message: String,
}

/// Payment details stored on the order (`transactionDetails`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub transaction_token: String,
    pub transaction_id: String,
    pub status: String,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    pub result_message: String,
    pub result_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTransactionResponse {
    pub transaction: TransactionOutcome,
    pub order_id: String,
}

/// `POST /payments/place-order-without-payment`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub preview_order_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: String,
    pub status: OrderStatus,
    pub payment_status: String,
}
