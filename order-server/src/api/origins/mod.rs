//! Origins API 模块 - 门店的扫码来源 (桌台、车位、活动链接)

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use shared::models::OriginListing;

use crate::api::dual_mount;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    dual_mount(
        "origins",
        Router::new().route("/{restaurant_id}/{location_id}", get(list)),
    )
}

/// GET /api/v1/origins/:r/:l - 来源列表和二维码样式
async fn list(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<OriginListing>> {
    tracing::info!(restaurant_id = %restaurant_id, location_id = %location_id, "GET origins");
    let listing = state
        .restaurant_service()
        .list_origins(&restaurant_id, &location_id)
        .await?;
    Ok(ApiResponse::success(listing))
}
