//! 根路由 - 欢迎页、健康检查、Socket 状态
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 欢迎信息和版本 |
//! | /health | GET | 健康检查 |
//! | /socket-status | GET | 实时推送端点信息 |

use axum::{Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::ApiResponse;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/socket-status", get(socket_status))
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    message: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 固定为 healthy
    status: &'static str,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct SocketStatusResponse {
    status: &'static str,
    endpoint: &'static str,
    transport: &'static str,
}

/// GET / - 欢迎信息
async fn root(State(state): State<ServerState>) -> ApiResponse<WelcomeResponse> {
    ApiResponse::success(WelcomeResponse {
        message: format!("Welcome to {}", state.config.app_name),
        version: state.config.app_version.clone(),
    })
}

/// GET /health - 健康检查
async fn health(State(state): State<ServerState>) -> ApiResponse<HealthResponse> {
    ApiResponse::success(HealthResponse {
        status: "healthy",
        version: state.config.app_version.clone(),
    })
}

/// GET /socket-status - Socket.IO 端点信息
async fn socket_status() -> ApiResponse<SocketStatusResponse> {
    ApiResponse::success(SocketStatusResponse {
        status: "active",
        endpoint: "/socket.io",
        transport: "websocket, polling",
    })
}
