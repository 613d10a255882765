//! Order Repository

use super::{BaseRepository, RepoResult};
use serde_json::{Map, Value};
use shared::models::{Order, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order (`_id` = order code)
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        self.base.insert(TABLE, &order.id, &order).await?;
        tracing::debug!(order_id = %order.id, total = order.total_cents, "Order created");
        Ok(order)
    }

    /// Find order by id
    pub async fn find_by_id(&self, order_id: &str) -> RepoResult<Option<Order>> {
        self.base.find_by_key(TABLE, order_id).await
    }

    /// Find orders of a location, newest first, optionally filtered by status
    pub async fn find_by_location(
        &self,
        restaurant_id: &str,
        location_id: &str,
        status: Option<OrderStatus>,
    ) -> RepoResult<Vec<Order>> {
        let sql = if status.is_some() {
            "SELECT * OMIT id FROM orders \
             WHERE restaurantId = $rid AND locationId = $lid AND status = $status \
             ORDER BY createdAt DESC"
        } else {
            "SELECT * OMIT id FROM orders \
             WHERE restaurantId = $rid AND locationId = $lid ORDER BY createdAt DESC"
        };
        let orders: Vec<Order> = self
            .base
            .db()
            .query(sql)
            .bind(("rid", restaurant_id.to_string()))
            .bind(("lid", location_id.to_string()))
            .bind(("status", status))
            .await?
            .take(0)?;
        tracing::debug!(location_id = %location_id, count = orders.len(), "Found orders");
        Ok(orders)
    }

    /// Find orders created in `[start, end)`, newest first
    pub async fn find_created_between(
        &self,
        restaurant_id: &str,
        location_id: &str,
        start: i64,
        end: i64,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * OMIT id FROM orders \
                 WHERE restaurantId = $rid AND locationId = $lid \
                 AND createdAt >= $start AND createdAt < $end \
                 ORDER BY createdAt DESC",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("lid", location_id.to_string()))
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find delivered orders completed in `[start, end)`
    ///
    /// 完成时间取 `pickedUpAt`，旧数据没有时退回 `updatedAt`。
    pub async fn find_delivered_between(
        &self,
        restaurant_id: &str,
        location_id: &str,
        start: i64,
        end: i64,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * OMIT id FROM orders \
                 WHERE restaurantId = $rid AND locationId = $lid \
                 AND status = 'order_delivered' \
                 AND (pickedUpAt ?? updatedAt) >= $start AND (pickedUpAt ?? updatedAt) < $end \
                 ORDER BY createdAt",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("lid", location_id.to_string()))
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Merge `patch` into the order and return the updated document
    ///
    /// Single-document update; returns `None` when the order does not exist.
    pub async fn merge(
        &self,
        order_id: &str,
        patch: Map<String, Value>,
    ) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('orders', $id) MERGE $patch RETURN NONE")
            .query("SELECT * OMIT id FROM type::thing('orders', $id)")
            .bind(("id", order_id.to_string()))
            .bind(("patch", Value::Object(patch)))
            .await?;
        let order: Option<Order> = result.take(1)?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::memory_db;
    use serde_json::json;

    fn order(id: &str, created_at: i64, status: OrderStatus) -> Order {
        Order {
            id: id.into(),
            order_id: id.into(),
            restaurant_id: "r1".into(),
            location_id: "l1".into(),
            status,
            total_cents: 1000,
            created_at,
            updated_at: created_at,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_newest_first_and_status_filter() {
        let repo = OrderRepository::new(memory_db().await);
        repo.create(order("ORD-A", 100, OrderStatus::OrderCreated)).await.unwrap();
        repo.create(order("ORD-B", 300, OrderStatus::OrderAccepted)).await.unwrap();
        repo.create(order("ORD-C", 200, OrderStatus::OrderCreated)).await.unwrap();

        let all = repo.find_by_location("r1", "l1", None).await.unwrap();
        let ids: Vec<_> = all.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-B", "ORD-C", "ORD-A"]);

        let created = repo
            .find_by_location("r1", "l1", Some(OrderStatus::OrderCreated))
            .await
            .unwrap();
        assert_eq!(created.len(), 2);

        let window = repo.find_created_between("r1", "l1", 100, 300).await.unwrap();
        let ids: Vec<_> = window.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-C", "ORD-A"]);
    }

    #[tokio::test]
    async fn test_merge_and_delivered_window() {
        let repo = OrderRepository::new(memory_db().await);
        repo.create(order("ORD-A", 100, OrderStatus::OrderCreated)).await.unwrap();

        let mut patch = Map::new();
        patch.insert("status".into(), json!("order_delivered"));
        patch.insert("updatedAt".into(), json!(500));
        patch.insert("pickedUpAt".into(), json!(500));
        let updated = repo.merge("ORD-A", patch).await.unwrap().unwrap();
        assert_eq!(updated.status, OrderStatus::OrderDelivered);
        assert_eq!(updated.picked_up_at, Some(500));
        assert_eq!(updated.created_at, 100);

        assert_eq!(repo.find_delivered_between("r1", "l1", 400, 600).await.unwrap().len(), 1);
        assert!(repo.find_delivered_between("r1", "l1", 0, 500).await.unwrap().is_empty());

        assert!(repo.merge("ORD-MISSING", Map::new()).await.unwrap().is_none());
    }
}
