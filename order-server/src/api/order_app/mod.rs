//! Order App API 模块 (点餐端)
//!
//! 只挂在 `/api/v1/order-app` 下。

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::api::API_PREFIX;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(&format!("{}/order-app", API_PREFIX), routes())
}

fn routes() -> Router<ServerState> {
    let restaurant_routes = Router::new()
        .route("/restaurants/{restaurant_id}", get(handler::get_restaurant))
        .route(
            "/restaurants/{restaurant_id}/locations/{location_id}",
            get(handler::get_location),
        )
        .route("/restaurants/origins/{origin_id}", get(handler::get_origin))
        .route(
            "/restaurants/{restaurant_id}/locations/{location_id}/menus",
            get(handler::list_menus),
        )
        .route(
            "/restaurants/{restaurant_id}/locations/{location_id}/menus/{menu_id}",
            get(handler::get_menu),
        );

    let order_routes = Router::new()
        .route("/cart/preview-order", post(handler::preview_order))
        .route("/orders", post(handler::create_order))
        .route("/orders/status", patch(handler::update_status))
        .route("/orders/{order_id}", get(handler::get_order))
        .route("/orders/{order_id}/status", get(handler::get_order_status))
        .route(
            "/restaurants/{restaurant_id}/locations/{location_id}/orders",
            get(handler::list_orders),
        )
        .route(
            "/restaurants/{restaurant_id}/locations/{location_id}/orders/today",
            get(handler::today_orders),
        );

    restaurant_routes.merge(order_routes)
}
