//! Payments API 模块 (模拟支付)

mod handler;

use axum::{Router, routing::post};

use crate::api::API_PREFIX;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(&format!("{}/payments", API_PREFIX), routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/start-transaction/{restaurant_id}",
            post(handler::start_transaction),
        )
        .route("/complete-transaction", post(handler::complete_transaction))
        .route(
            "/place-order-without-payment",
            post(handler::place_order_without_payment),
        )
}
