//! Database Module
//!
//! 嵌入式 SurrealDB：生产环境 RocksDB，测试环境 `mem://`。
//! 每个集合一张表，记录 key 与文档的 `_id` 字段一致。

pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

/// 查询索引，启动时幂等创建
const INDEXES: &str = r#"
    DEFINE INDEX IF NOT EXISTS idx_locations_restaurant ON TABLE locations COLUMNS restaurantId;
    DEFINE INDEX IF NOT EXISTS idx_menus_location ON TABLE menus COLUMNS restaurantId, locationId;
    DEFINE INDEX IF NOT EXISTS idx_origins_location
        ON TABLE origins COLUMNS restaurantId, locationId;
    DEFINE INDEX IF NOT EXISTS idx_stations_location
        ON TABLE stations COLUMNS restaurantId, locationId;
    DEFINE INDEX IF NOT EXISTS idx_orders_location ON TABLE orders COLUMNS restaurantId, locationId;
    DEFINE INDEX IF NOT EXISTS idx_orders_created ON TABLE orders COLUMNS createdAt;
    DEFINE INDEX IF NOT EXISTS idx_campaigns_location
        ON TABLE campaigns COLUMNS restaurantId, locationId;
    DEFINE INDEX IF NOT EXISTS idx_users_user_id ON TABLE users COLUMNS userId UNIQUE;
    DEFINE INDEX IF NOT EXISTS idx_auth_codes_session ON TABLE auth_codes COLUMNS preAuthSessionId;
"#;

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the store named by `conn` (`mem://` or `rocksdb://<path>`)
    pub async fn new(conn: &str, namespace: &str, database: &str) -> Result<Self, AppError> {
        let db = if conn.starts_with("mem://") {
            Surreal::new::<Mem>(())
                .await
                .map_err(|e| AppError::database(format!("Failed to open memory database: {e}")))?
        } else {
            let path = conn.strip_prefix("rocksdb://").unwrap_or(conn);
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::database(format!("Failed to create database directory: {e}"))
                })?;
            }
            Surreal::new::<RocksDb>(path)
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
        };

        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        db.query(INDEXES)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;

        tracing::info!(
            conn = %conn,
            namespace = %namespace,
            database = %database,
            "Database connection established"
        );

        Ok(Self { db })
    }

    /// In-memory store (tests)
    pub async fn memory() -> Result<Self, AppError> {
        Self::new("mem://", "test", "test").await
    }
}
