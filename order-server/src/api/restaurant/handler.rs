//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    CategoryUpsert, DashboardOrder, DashboardStatusResponse, DashboardStatusUpdate,
    LocationCreate, LocationListing, MenuCreate, MenuResponse, MenuSummary, OrderStatus,
    RestaurantCreate, RestaurantSummary,
};

use crate::core::ServerState;
use crate::transformers::transform_dashboard_order;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ValidatedJson};

// ========== Restaurant / Location ==========

/// POST /api/v1/restaurant/create/:user_id - 创建餐厅并归属到用户
pub async fn create_restaurant(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<ApiResponse<RestaurantSummary>> {
    tracing::info!(user_id = %user_id, "POST create restaurant");
    let restaurant = state
        .restaurant_service()
        .create_restaurant(&user_id, payload)
        .await?;
    Ok(ApiResponse::success_with_message(
        "Restaurant created",
        restaurant,
    ))
}

/// POST /api/v1/restaurant/:restaurant_id/location/create - 创建门店
pub async fn create_location(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
    Json(payload): Json<LocationCreate>,
) -> AppResult<ApiResponse<LocationListing>> {
    tracing::info!(restaurant_id = %restaurant_id, "POST create location");
    let location = state
        .restaurant_service()
        .create_location(&restaurant_id, payload)
        .await?;
    Ok(ApiResponse::success_with_message("Location created", location))
}

/// GET /api/v1/restaurant/restaurants/:restaurant_id/locations - 门店列表
pub async fn list_locations(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> AppResult<ApiResponse<Vec<LocationListing>>> {
    tracing::info!(restaurant_id = %restaurant_id, "GET locations");
    let locations = state
        .restaurant_service()
        .list_locations(&restaurant_id)
        .await?;
    Ok(ApiResponse::success(locations))
}

/// GET /api/v1/restaurant/:user_id - 用户的餐厅
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<RestaurantSummary>>> {
    tracing::info!(user_id = %user_id, "GET restaurants for user");
    let restaurants = state
        .restaurant_service()
        .restaurants_for_user(&user_id)
        .await?;
    Ok(ApiResponse::success(restaurants))
}

// ========== Dashboard orders ==========

/// GET /api/v1/restaurant/orders/today/:r/:l - 看板今日订单
pub async fn today_orders(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Vec<DashboardOrder>>> {
    tracing::info!(
        restaurant_id = %restaurant_id,
        location_id = %location_id,
        "GET dashboard today orders"
    );
    let orders = state
        .order_service()
        .today_orders(&restaurant_id, &location_id)
        .await?;
    Ok(ApiResponse::success(
        orders.iter().map(transform_dashboard_order).collect(),
    ))
}

/// GET /api/v1/restaurant/orders/:r/:l/:order_id - 看板订单详情
pub async fn get_order(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id, order_id)): Path<(String, String, String)>,
) -> AppResult<ApiResponse<DashboardOrder>> {
    tracing::info!(order_id = %order_id, "GET dashboard order");
    let order = state.order_service().get_order(&order_id).await?;
    if order.restaurant_id != restaurant_id || order.location_id != location_id {
        return Err(AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", order_id));
    }
    Ok(ApiResponse::success(transform_dashboard_order(&order)))
}

/// POST /api/v1/restaurant/order-status/ - 看板更新订单状态
pub async fn update_order_status(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<DashboardStatusUpdate>,
) -> AppResult<ApiResponse<DashboardStatusResponse>> {
    tracing::info!(
        order_id = %payload.order_id,
        status = %payload.order_status,
        "POST dashboard order status"
    );
    let status = OrderStatus::from_dashboard_name(&payload.order_status).ok_or_else(|| {
        AppError::new(ErrorCode::InvalidOrderStatus)
            .with_detail("orderStatus", payload.order_status.clone())
    })?;

    state
        .order_service()
        .update_status(&payload.order_id, status, None)
        .await?;

    Ok(ApiResponse::success(DashboardStatusResponse {
        order_id: payload.order_id,
        status: payload.order_status,
    }))
}

// ========== Menus ==========

/// GET /api/v1/restaurant/restaurants/:r/locations/:l/menus - 菜单列表
pub async fn list_menus(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Vec<MenuSummary>>> {
    tracing::info!(restaurant_id = %restaurant_id, location_id = %location_id, "GET menus");
    let menus = state
        .menu_service()
        .list_summaries(&restaurant_id, &location_id)
        .await?;
    Ok(ApiResponse::success(menus))
}

/// POST /api/v1/restaurant/restaurants/:r/locations/:l/menu - 创建菜单
pub async fn create_menu(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
    ValidatedJson(payload): ValidatedJson<MenuCreate>,
) -> AppResult<ApiResponse<MenuSummary>> {
    tracing::info!(
        restaurant_id = %restaurant_id,
        menu_slug = %payload.menu_slug,
        "POST create menu"
    );
    let menu = state
        .menu_service()
        .create_menu(&restaurant_id, &location_id, payload)
        .await?;
    Ok(ApiResponse::success_with_message("Menu created", menu))
}

/// GET /api/v1/restaurant/restaurants/:r/locations/:l/menus/:menu_id - 菜单详情
pub async fn get_menu(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id, menu_id)): Path<(String, String, String)>,
) -> AppResult<ApiResponse<MenuResponse>> {
    tracing::info!(menu_id = %menu_id, "GET menu");
    let menu = state
        .menu_service()
        .get_menu(&restaurant_id, &location_id, &menu_id)
        .await?;
    Ok(ApiResponse::success(menu))
}

/// POST /api/v1/restaurant/:r/location/:l/menu/:menu_id/category - 新增或更新分类
pub async fn upsert_category(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id, menu_id)): Path<(String, String, String)>,
    ValidatedJson(payload): ValidatedJson<CategoryUpsert>,
) -> AppResult<ApiResponse<bool>> {
    tracing::info!(menu_id = %menu_id, category_id = ?payload.id, "POST upsert category");
    state
        .menu_service()
        .upsert_category(&restaurant_id, &location_id, &menu_id, payload)
        .await?;
    Ok(ApiResponse::success(true))
}
