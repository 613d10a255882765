//! Login API 模块 - 模拟验证码登录
//!
//! 路由和响应体沿用 SuperTokens passwordless 协议，前端 SDK 直接对接：
//! 响应体是裸的 `{status, ...}`，不使用统一信封。
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /signinup/code | POST | 发送验证码 |
//! | /signinup/code/consume | POST | 校验验证码并登录 |
//! | /session/refresh | POST | 刷新 access token |
//! | /signout | POST | 退出登录 |
//! | /session/verify | GET | 校验会话 |

mod cookies;
mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::dual_mount;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    dual_mount("login", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/signinup/code", post(handler::create_code))
        .route("/signinup/code/consume", post(handler::consume_code))
        .route("/session/refresh", post(handler::refresh_session))
        .route("/signout", post(handler::sign_out))
        .route("/session/verify", get(handler::verify_session))
}
