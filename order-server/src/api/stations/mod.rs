//! Stations API 模块 - 厨房工位

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use shared::models::Station;

use crate::api::dual_mount;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    dual_mount(
        "stations",
        Router::new().route("/{restaurant_id}/{location_id}", get(list)),
    )
}

/// GET /api/v1/stations/:r/:l - 工位列表 (没有工位时 404)
async fn list(
    State(state): State<ServerState>,
    Path((restaurant_id, location_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Vec<Station>>> {
    tracing::info!(restaurant_id = %restaurant_id, location_id = %location_id, "GET stations");
    let stations = state
        .restaurant_service()
        .list_stations(&restaurant_id, &location_id)
        .await?;
    Ok(ApiResponse::success(stations))
}
