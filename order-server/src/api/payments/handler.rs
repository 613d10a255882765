//! Payments API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    CompleteTransactionRequest, CompleteTransactionResponse, PlaceOrderRequest,
    PlaceOrderResponse, StartTransactionResponse,
};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

/// POST /api/v1/payments/start-transaction/:restaurant_id - 发起交易
pub async fn start_transaction(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> ApiResponse<StartTransactionResponse> {
    tracing::info!(restaurant_id = %restaurant_id, "POST start-transaction");
    ApiResponse::success(state.payment_service().start_transaction(&restaurant_id))
}

/// POST /api/v1/payments/complete-transaction - 完成支付并生成订单
pub async fn complete_transaction(
    State(state): State<ServerState>,
    Json(payload): Json<CompleteTransactionRequest>,
) -> AppResult<ApiResponse<CompleteTransactionResponse>> {
    tracing::info!(preview_order_id = ?payload.preview_order_id, "POST complete-transaction");
    let response = state.payment_service().complete_transaction(payload).await?;
    Ok(ApiResponse::success(response))
}

/// POST /api/v1/payments/place-order-without-payment - 现金下单
pub async fn place_order_without_payment(
    State(state): State<ServerState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<ApiResponse<PlaceOrderResponse>> {
    tracing::info!(
        preview_order_id = ?payload.preview_order_id,
        "POST place-order-without-payment"
    );
    let response = state
        .payment_service()
        .place_without_payment(payload.preview_order_id)
        .await?;
    Ok(ApiResponse::success_with_message(
        "Order placed successfully",
        response,
    ))
}
