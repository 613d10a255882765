//! Campaign API 模块

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use shared::models::Campaign;

use crate::api::dual_mount;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    dual_mount(
        "campaign",
        Router::new().route(
            "/restaurant/{restaurant_id}/location/{location_id}",
            get(list),
        ),
    )
}

/// GET /api/v1/campaign/restaurant/:r/location/:l - 活动列表 (新的在前)
async fn list(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Vec<Campaign>>> {
    tracing::info!(restaurant_id = %restaurant_id, location_id = %location_id, "GET campaigns");
    let campaigns = state
        .restaurant_service()
        .list_campaigns(&restaurant_id, &location_id)
        .await?;
    Ok(ApiResponse::success(campaigns))
}
