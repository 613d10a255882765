//! Printers API 模块 - 门店内嵌的打印机配置

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::Value;

use crate::api::dual_mount;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    dual_mount(
        "printers",
        Router::new().route("/{restaurant_id}/{location_id}", get(list)),
    )
}

/// GET /api/v1/printers/:r/:l - 打印机列表
async fn list(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Vec<Value>>> {
    tracing::info!(restaurant_id = %restaurant_id, location_id = %location_id, "GET printers");
    let printers = state
        .restaurant_service()
        .list_printers(&restaurant_id, &location_id)
        .await?;
    Ok(ApiResponse::success(printers))
}
