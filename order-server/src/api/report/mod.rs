//! Report API 模块
//!
//! | 路径 | 说明 |
//! |------|------|
//! | /order_history/{r}/{l}/{date} | 当天创建的全部订单 |
//! | /sales_summary/{r}/{l}?days=N | 最近 N 天每日销售额 (默认 7) |
//! | /sales_by_item/{r}/{l}/{date} | 当天按菜品汇总 |
//! | /sales_by_origin/{r}/{l}/{date} | 当天按来源汇总 |
//!
//! `date` 格式 `YYYY-MM-DD`，按门店时区解释。

mod handler;

use axum::{Router, routing::get};

use crate::api::dual_mount;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    dual_mount("report", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/order_history/{restaurant_id}/{location_id}/{date}",
            get(handler::order_history),
        )
        .route(
            "/sales_summary/{restaurant_id}/{location_id}",
            get(handler::sales_summary),
        )
        .route(
            "/sales_by_item/{restaurant_id}/{location_id}/{date}",
            get(handler::sales_by_item),
        )
        .route(
            "/sales_by_origin/{restaurant_id}/{location_id}/{date}",
            get(handler::sales_by_origin),
        )
}
