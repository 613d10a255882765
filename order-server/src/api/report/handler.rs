//! Report API Handlers

use axum::extract::{Path, Query, State};
use shared::models::{DailySales, ItemSales, Order, OriginSales, SalesSummaryQuery};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

/// GET /api/v1/report/order_history/:r/:l/:date - 订单历史
pub async fn order_history(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id, date)): Path<(String, String, String)>,
) -> AppResult<ApiResponse<Vec<Order>>> {
    tracing::info!(
        restaurant_id = %restaurant_id,
        location_id = %location_id,
        date = %date,
        "GET order history"
    );
    let orders = state
        .report_service()
        .order_history(&restaurant_id, &location_id, &date)
        .await?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/v1/report/sales_summary/:r/:l?days=N - 每日销售额
pub async fn sales_summary(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
    Query(query): Query<SalesSummaryQuery>,
) -> AppResult<ApiResponse<Vec<DailySales>>> {
    tracing::info!(
        restaurant_id = %restaurant_id,
        location_id = %location_id,
        days = ?query.days,
        "GET sales summary"
    );
    let summary = state
        .report_service()
        .sales_summary(&restaurant_id, &location_id, query.days)
        .await?;
    Ok(ApiResponse::success(summary))
}

/// GET /api/v1/report/sales_by_item/:r/:l/:date - 按菜品汇总
pub async fn sales_by_item(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id, date)): Path<(String, String, String)>,
) -> AppResult<ApiResponse<Vec<ItemSales>>> {
    tracing::info!(
        restaurant_id = %restaurant_id,
        location_id = %location_id,
        date = %date,
        "GET sales by item"
    );
    let rows = state
        .report_service()
        .sales_by_item(&restaurant_id, &location_id, &date)
        .await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/v1/report/sales_by_origin/:r/:l/:date - 按来源汇总
pub async fn sales_by_origin(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id, date)): Path<(String, String, String)>,
) -> AppResult<ApiResponse<Vec<OriginSales>>> {
    tracing::info!(
        restaurant_id = %restaurant_id,
        location_id = %location_id,
        date = %date,
        "GET sales by origin"
    );
    let rows = state
        .report_service()
        .sales_by_origin(&restaurant_id, &location_id, &date)
        .await?;
    Ok(ApiResponse::success(rows))
}
