//! Repository Module
//!
//! 每个集合一个 repository，只负责查询构造，不含业务逻辑。
//!
//! # 查询约定
//!
//! - 记录 id: `type::thing($tb, $id)`，key 与文档 `_id` 一致
//! - 读取一律 `SELECT * OMIT id`，文档里的 `_id` 就是对外 id
//! - 时间戳都是 `i64` Unix millis

// Catalog
pub mod campaign;
pub mod location;
pub mod menu;
pub mod origin;
pub mod restaurant;
pub mod station;

// Orders
pub mod order;
pub mod preview;

// Identity
pub mod auth;
pub mod user;

// Re-exports
pub use auth::AuthRepository;
pub use campaign::CampaignRepository;
pub use location::LocationRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use origin::OriginRepository;
pub use preview::PreviewRepository;
pub use restaurant::RestaurantRepository;
pub use station::StationRepository;
pub use user::UserRepository;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// 并发事务提交冲突，可以重试
    #[error("Write conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        // record key taken ("already exists") or unique index hit ("already contains")
        if message.contains("already exists") || message.contains("already contains") {
            RepoError::Duplicate(message)
        } else if message.contains("can be retried") {
            RepoError::Conflict(message)
        } else {
            RepoError::Database(message)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) | RepoError::Conflict(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// 提交冲突时的最大重试次数
const MAX_CONFLICT_RETRIES: u32 = 16;

/// Re-run a single-statement write while the store reports a commit conflict
///
/// 每次冲突都说明另一个事务已经提交，所以并发写入者数量不超过上限时一定能完成。
pub async fn retry_on_conflict<T, F, Fut>(mut op: F) -> RepoResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RepoResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(RepoError::Conflict(msg)) if attempt < MAX_CONFLICT_RETRIES => {
                attempt += 1;
                tracing::debug!(attempt, error = %msg, "Write conflict, retrying");
                tokio::time::sleep(Duration::from_millis(u64::from(attempt))).await;
            }
            result => return result,
        }
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Find one document by record key
    pub async fn find_by_key<T: DeserializeOwned>(
        &self,
        table: &'static str,
        id: &str,
    ) -> RepoResult<Option<T>> {
        let doc: Option<T> = self
            .db
            .query("SELECT * OMIT id FROM type::thing($tb, $id)")
            .bind(("tb", table))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(doc)
    }

    /// Insert a document under `id`, failing with `Duplicate` if the key is taken
    pub async fn insert<T>(&self, table: &'static str, id: &str, data: &T) -> RepoResult<()>
    where
        T: Serialize + Clone + 'static,
    {
        self.db
            .query("CREATE type::thing($tb, $id) CONTENT $data RETURN NONE")
            .bind(("tb", table))
            .bind(("id", id.to_string()))
            .bind(("data", data.clone()))
            .await?
            .check()?;
        Ok(())
    }

    /// Delete by record key, returning whether a document existed
    pub async fn delete_by_key(&self, table: &'static str, id: &str) -> RepoResult<bool> {
        let before: Vec<serde_json::Value> = self
            .db
            .query("DELETE type::thing($tb, $id) RETURN BEFORE")
            .bind(("tb", table))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(!before.is_empty())
    }
}
