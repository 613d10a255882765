//! OrderBuddy Order Server - 餐厅点餐后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储，每个集合一个 Repository
//! - **服务** (`services`): 菜单、订单、支付、报表、用户、模拟登录
//! - **计价** (`pricing`): 订单项和订单总额计算 (整数分)
//! - **转换** (`transformers`): 存储文档 → 客户端响应结构
//! - **实时推送** (`services::notifier`): Socket.IO 房间广播
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 数据库连接和 Repository
//! ├── services/      # 业务服务
//! ├── pricing/       # 计价
//! ├── transformers.rs
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时区、请求校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod pricing;
pub mod services;
pub mod transformers;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 日志、生产环境错误脱敏
///
/// `.env` 需要在加载 [`Config`] 之前读取，由 `main` 负责。
pub fn setup_environment(config: &Config) {
    let log_dir = config
        .log_dir
        .as_deref()
        .filter(|dir| std::path::Path::new(dir).is_dir());
    init_logger_with_file(Some(config.log_level.as_str()), Some(config.log_json), log_dir);

    shared::error::hide_system_details(config.is_production());
}

pub fn print_banner() {
    println!(
        r#"
   ____          __          ____            __    __
  / __ \_________/ /__  _____/ __ )__  ______/ /___/ /_  __
 / / / / ___/ __  / _ \/ ___/ __  / / / / __  / __  / / / /
/ /_/ / /  / /_/ /  __/ /  / /_/ / /_/ / /_/ / /_/ / /_/ /
\____/_/   \__,_/\___/_/  /_____/\__,_/\__,_/\__,_/\__, /
                                                  /____/
    "#
    );
}
