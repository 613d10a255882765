//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 欢迎页、健康检查、Socket 状态
//! - [`order_app`] - 点餐端：餐厅、门店、菜单、预览、订单
//! - [`payments`] - 模拟支付
//! - [`restaurant`] - 管理端：餐厅、门店、看板订单、菜单维护
//! - [`origins`] / [`stations`] / [`printers`] / [`campaign`] - 门店配置查询
//! - [`report`] - 销售报表
//! - [`users`] - 用户同步
//! - [`login`] - 模拟验证码登录 (SuperTokens 兼容)
//!
//! 除 `order_app` 和 `payments` 外，每组路由同时挂在 `/api/v1/<family>`
//! 和根路径 `/<family>` 下 (兼容旧客户端)。

pub mod campaign;
pub mod health;
pub mod login;
pub mod order_app;
pub mod origins;
pub mod payments;
pub mod printers;
pub mod report;
pub mod restaurant;
pub mod stations;
pub mod users;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::{Config, ServerState};

/// API version prefix
pub const API_PREFIX: &str = "/api/v1";

/// Headers the auth SDK reads from responses
const EXPOSED_HEADERS: [&str; 3] = ["front-token", "st-access-token", "st-refresh-token"];

/// Mount `routes` under `/api/v1/{family}` and `/{family}`
pub(crate) fn dual_mount(family: &str, routes: Router<ServerState>) -> Router<ServerState> {
    Router::new()
        .nest(&format!("{}/{}", API_PREFIX, family), routes.clone())
        .nest(&format!("/{}", family), routes)
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(order_app::router())
        .merge(payments::router())
        .merge(restaurant::router())
        .merge(origins::router())
        .merge(stations::router())
        .merge(printers::router())
        .merge(campaign::router())
        .merge(report::router())
        .merge(users::router())
        .merge(login::router())
}

/// Build the fully configured application
///
/// Used by the HTTP server and by oneshot calls in tests.
pub fn build_app(state: &ServerState) -> Router {
    let mut app = build_router().with_state(state.clone());

    // Socket.IO - 拦截 /socket.io，其余请求透传给路由
    if let Some(socket_layer) = state.socket_layer.clone() {
        app = app.layer(socket_layer);
    }

    app
        // CORS - 允许带 cookie 的跨域请求
        .layer(cors_layer(&state.config))
        // Trace - 每个请求一个 span
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins()
            .iter()
            .filter_map(|o| HeaderValue::from_str(o).ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers(EXPOSED_HEADERS.map(HeaderName::from_static))
}
