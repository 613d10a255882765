//! Order App API Handlers

use axum::extract::{Path, Query, State};
use shared::models::{
    CreateOrderRequest, LocationDetails, MenuResponse, MenuSummary, Order, OrderConfirmation,
    OrderListQuery, OrderStatusResponse, OriginDetails, PreviewOrderRequest, PreviewOrderResponse,
    RestaurantSummary, UpdateOrderStatusRequest,
};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ValidatedJson};

// ========== Restaurant / Location / Menu ==========

/// GET /api/v1/order-app/restaurants/:restaurant_id - 餐厅信息
pub async fn get_restaurant(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> AppResult<ApiResponse<RestaurantSummary>> {
    tracing::info!(restaurant_id = %restaurant_id, "GET order-app restaurant");
    let restaurant = state.restaurant_service().get_restaurant(&restaurant_id).await?;
    Ok(ApiResponse::success(restaurant))
}

/// GET /api/v1/order-app/restaurants/:restaurant_id/locations/:location_id - 门店信息
pub async fn get_location(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<LocationDetails>> {
    tracing::info!(
        restaurant_id = %restaurant_id,
        location_id = %location_id,
        "GET order-app location"
    );
    let location = state
        .restaurant_service()
        .get_location(&restaurant_id, &location_id)
        .await?;
    Ok(ApiResponse::success(location))
}

/// GET /api/v1/order-app/restaurants/origins/:origin_id - 扫码来源
pub async fn get_origin(
    State(state): State<ServerState>,
    Path(origin_id): Path<String>,
) -> AppResult<ApiResponse<OriginDetails>> {
    tracing::info!(origin_id = %origin_id, "GET order-app origin");
    let origin = state.restaurant_service().get_origin(&origin_id).await?;
    Ok(ApiResponse::success(origin))
}

/// GET /api/v1/order-app/restaurants/:r/locations/:l/menus - 菜单列表
pub async fn list_menus(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Vec<MenuSummary>>> {
    tracing::info!(
        restaurant_id = %restaurant_id,
        location_id = %location_id,
        "GET order-app menus"
    );
    let menus = state
        .menu_service()
        .list_summaries(&restaurant_id, &location_id)
        .await?;
    Ok(ApiResponse::success(menus))
}

/// GET /api/v1/order-app/restaurants/:r/locations/:l/menus/:menu_id - 菜单详情
pub async fn get_menu(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id, menu_id)): Path<(String, String, String)>,
) -> AppResult<ApiResponse<MenuResponse>> {
    tracing::info!(menu_id = %menu_id, "GET order-app menu");
    let menu = state
        .menu_service()
        .get_menu(&restaurant_id, &location_id, &menu_id)
        .await?;
    Ok(ApiResponse::success(menu))
}

// ========== Orders ==========

/// POST /api/v1/order-app/cart/preview-order - 价格预览
pub async fn preview_order(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<PreviewOrderRequest>,
) -> AppResult<ApiResponse<PreviewOrderResponse>> {
    tracing::info!(
        restaurant_id = %payload.restaurant_id,
        items = payload.items.len(),
        "POST preview-order"
    );
    let preview = state.order_service().preview_order(payload).await?;
    Ok(ApiResponse::success(preview))
}

/// POST /api/v1/order-app/orders - 直接下单
pub async fn create_order(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<ApiResponse<OrderConfirmation>> {
    tracing::info!(
        restaurant_id = %payload.restaurant_id,
        items = payload.items.len(),
        "POST order"
    );
    let confirmation = state.order_service().create_order(payload).await?;
    Ok(ApiResponse::success_with_message(
        "Order created successfully",
        confirmation,
    ))
}

/// GET /api/v1/order-app/orders/:order_id - 订单详情
pub async fn get_order(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<ApiResponse<Order>> {
    tracing::info!(order_id = %order_id, "GET order");
    let order = state.order_service().get_order(&order_id).await?;
    Ok(ApiResponse::success(order))
}

/// GET /api/v1/order-app/orders/:order_id/status - 订单状态
pub async fn get_order_status(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<ApiResponse<OrderStatusResponse>> {
    tracing::info!(order_id = %order_id, "GET order status");
    let status = state.order_service().get_order_status(&order_id).await?;
    Ok(ApiResponse::success(status))
}

/// PATCH /api/v1/order-app/orders/status - 更新订单状态
pub async fn update_status(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderStatusRequest>,
) -> AppResult<ApiResponse<OrderStatusResponse>> {
    tracing::info!(order_id = %payload.order_id, status = %payload.status, "PATCH order status");
    let order = state
        .order_service()
        .update_status(&payload.order_id, payload.status, payload.estimated_minutes)
        .await?;
    Ok(ApiResponse::success(OrderStatusResponse::from(&order)))
}

/// GET /api/v1/order-app/restaurants/:r/locations/:l/orders - 门店订单 (可按状态过滤)
pub async fn list_orders(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<ApiResponse<Vec<Order>>> {
    tracing::info!(
        restaurant_id = %restaurant_id,
        location_id = %location_id,
        "GET location orders"
    );
    let orders = state
        .order_service()
        .list_orders(&restaurant_id, &location_id, query.status)
        .await?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/v1/order-app/restaurants/:r/locations/:l/orders/today - 今日订单
pub async fn today_orders(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Vec<Order>>> {
    tracing::info!(restaurant_id = %restaurant_id, location_id = %location_id, "GET today orders");
    let orders = state
        .order_service()
        .today_orders(&restaurant_id, &location_id)
        .await?;
    Ok(ApiResponse::success(orders))
}
