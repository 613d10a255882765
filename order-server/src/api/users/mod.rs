//! Users API 模块 - 外部身份同步

use axum::{Router, extract::State, routing::post};
use shared::models::{CreateUserRequest, CreateUserResponse, DeleteUserRequest};

use crate::api::dual_mount;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ValidatedJson};

pub fn router() -> Router<ServerState> {
    dual_mount(
        "users",
        Router::new()
            .route("/create-user", post(create_user))
            .route("/delete-user", post(delete_user)),
    )
}

/// POST /api/v1/users/create-user - 创建或更新用户
async fn create_user(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<ApiResponse<CreateUserResponse>> {
    tracing::info!(user_id = %payload.user_id, "POST create-user");
    let response = state.user_service().upsert_user(payload).await?;
    Ok(ApiResponse::success(response))
}

/// POST /api/v1/users/delete-user - 删除用户
async fn delete_user(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<DeleteUserRequest>,
) -> AppResult<ApiResponse<&'static str>> {
    tracing::info!(user_id = %payload.user_id, "POST delete-user");
    state.user_service().delete_user(&payload.user_id).await?;
    Ok(ApiResponse::success("User deleted"))
}
