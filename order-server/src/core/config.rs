use std::path::PathBuf;

/// 默认允许的跨域来源 (本地开发前端)
const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:5173,http://localhost:3000,http://localhost:5174";

/// 服务器配置 - 启动时从环境变量加载一次，之后不再修改
///
/// # 环境变量
///
/// 启动时会先通过 `dotenv` 加载 `.env` 文件 (如果存在)。
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | PORT | 8000 | HTTP 服务端口 |
/// | WORK_DIR | ./data | 工作目录 |
/// | DB_CONN_STRING | rocksdb://{WORK_DIR}/database | 数据库地址，`mem://` 为内存库 |
/// | DB_NAMESPACE | orderbuddy | 数据库 namespace |
/// | DB_NAME | orderbuddy | 数据库名 |
/// | ALLOWED_ORIGINS | localhost 前端 | 逗号分隔的 CORS 来源，`*` 表示任意 |
/// | API_ENDPOINT | http://localhost:8000 | 对外 API 地址 |
/// | STORE_ENDPOINT | http://localhost:5173 | 点餐前端地址 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志目录 (按天滚动) |
/// | APP_NAME | OrderBuddy API | 应用名称 |
/// | APP_VERSION | crate 版本 | 应用版本 |
/// | DEFAULT_TAX_RATE | 0.08 | 默认税率 |
///
/// # 示例
///
/// ```ignore
/// PORT=9000 DB_CONN_STRING=mem:// cargo run -p order-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub port: u16,
    /// 工作目录，存放数据库和日志
    pub work_dir: String,
    /// 数据库连接串
    pub db_conn_string: String,
    pub db_namespace: String,
    pub db_name: String,
    /// CORS 允许来源
    pub allowed_origins: Vec<String>,
    pub api_endpoint: String,
    pub store_endpoint: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub app_name: String,
    pub app_version: String,
    /// 未指定菜单时的税率，报表也使用此税率倒推税额
    pub default_tax_rate: f64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let db_conn_string = std::env::var("DB_CONN_STRING")
            .unwrap_or_else(|_| format!("rocksdb://{}/database", work_dir));

        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            work_dir,
            db_conn_string,
            db_namespace: std::env::var("DB_NAMESPACE").unwrap_or_else(|_| "orderbuddy".into()),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "orderbuddy".into()),
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.into()),
            ),
            api_endpoint: std::env::var("API_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:8000".into()),
            store_endpoint: std::env::var("STORE_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            app_name: std::env::var("APP_NAME").unwrap_or_else(|_| "OrderBuddy API".into()),
            app_version: std::env::var("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").into()),
            default_tax_rate: std::env::var("DEFAULT_TAX_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.08),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景，数据库切换为内存库
    pub fn with_overrides(work_dir: impl Into<String>, port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.port = port;
        config.db_conn_string = "mem://".into();
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 是否允许任意来源
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }

    /// CORS 来源列表 (含 API / 前端地址，去重)
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins = self.allowed_origins.clone();
        for extra in [&self.api_endpoint, &self.store_endpoint] {
            if !extra.is_empty() && !origins.contains(extra) {
                origins.push(extra.clone());
            }
        }
        origins
    }

    /// 工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
