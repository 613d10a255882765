//! Restaurant API 模块 (管理端)
//!
//! 挂在 `/api/v1/restaurant` 和 `/restaurant` 下。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::dual_mount;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    dual_mount("restaurant", routes())
}

fn routes() -> Router<ServerState> {
    // 首段参数必须同名: `{id}` 是 userId 或 restaurantId
    let restaurant_routes = Router::new()
        .route("/create/{user_id}", post(handler::create_restaurant))
        .route(
            "/{id}/location/create",
            post(handler::create_location),
        )
        .route(
            "/restaurants/{restaurant_id}/locations",
            get(handler::list_locations),
        )
        .route("/{id}", get(handler::list_for_user));

    let order_routes = Router::new()
        .route(
            "/orders/today/{restaurant_id}/{location_id}",
            get(handler::today_orders),
        )
        .route(
            "/orders/{restaurant_id}/{location_id}/{order_id}",
            get(handler::get_order),
        )
        .route("/order-status/", post(handler::update_order_status));

    let menu_routes = Router::new()
        .route(
            "/restaurants/{restaurant_id}/locations/{location_id}/menus",
            get(handler::list_menus),
        )
        .route(
            "/restaurants/{restaurant_id}/locations/{location_id}/menu",
            post(handler::create_menu),
        )
        .route(
            "/restaurants/{restaurant_id}/locations/{location_id}/menus/{menu_id}",
            get(handler::get_menu),
        )
        .route(
            "/{id}/location/{location_id}/menu/{menu_id}/category",
            post(handler::upsert_category),
        );

    restaurant_routes.merge(order_routes).merge(menu_routes)
}
