//! Preview Order Repository
//!
//! 预览单只能被转换一次：`claim` 用单条 `DELETE ... RETURN BEFORE`
//! 同时读取并删除，并发的第二个调用方拿到 `None`。

use super::{BaseRepository, RepoResult};
use shared::models::PreviewOrder;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "orders_preview";

#[derive(Clone)]
pub struct PreviewRepository {
    base: BaseRepository,
}

impl PreviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, preview: PreviewOrder) -> RepoResult<PreviewOrder> {
        self.base.insert(TABLE, &preview.id, &preview).await?;
        tracing::debug!(
            preview_id = %preview.id,
            total = preview.total_price_cents,
            "Preview order created"
        );
        Ok(preview)
    }

    pub async fn find_by_id(&self, preview_id: &str) -> RepoResult<Option<PreviewOrder>> {
        self.base.find_by_key(TABLE, preview_id).await
    }

    /// Atomically read and delete a preview
    pub async fn claim(&self, preview_id: &str) -> RepoResult<Option<PreviewOrder>> {
        let claimed: Vec<PreviewOrder> = self
            .base
            .db()
            .query("DELETE type::thing('orders_preview', $id) RETURN BEFORE")
            .bind(("id", preview_id.to_string()))
            .await?
            .take(0)?;
        let preview = claimed.into_iter().next();
        if preview.is_some() {
            tracing::debug!(preview_id = %preview_id, "Preview order claimed");
        }
        Ok(preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::memory_db;

    fn preview(id: &str) -> PreviewOrder {
        PreviewOrder {
            id: id.into(),
            preview_order_id: id.into(),
            restaurant_id: "r1".into(),
            location_id: "l1".into(),
            subtotal_cents: 499,
            tax_cents: 39,
            total_price_cents: 538,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_claim_is_single_use() {
        let repo = PreviewRepository::new(memory_db().await);
        repo.create(preview("PREV-0001")).await.unwrap();

        let first = repo.claim("PREV-0001").await.unwrap().unwrap();
        assert_eq!(first.total_price_cents, 538);
        assert!(repo.claim("PREV-0001").await.unwrap().is_none());
        assert!(repo.find_by_id("PREV-0001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_claims_yield_one_winner() {
        let repo = PreviewRepository::new(memory_db().await);
        repo.create(preview("PREV-0002")).await.unwrap();

        let (a, b) = tokio::join!(repo.claim("PREV-0002"), repo.claim("PREV-0002"));
        // 冲突的一方可能返回错误，也可能返回 None，但不会两个都成功
        let winners = [a, b]
            .into_iter()
            .filter(|r| matches!(r, Ok(Some(_))))
            .count();
        assert_eq!(winners, 1);
    }
}
