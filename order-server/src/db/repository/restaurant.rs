//! Restaurant Repository

use super::{BaseRepository, RepoResult};
use shared::models::Restaurant;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "restaurants";

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find restaurant by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Restaurant>> {
        let restaurant = self.base.find_by_key(TABLE, id).await?;
        if restaurant.is_none() {
            tracing::debug!(restaurant_id = %id, "Restaurant not found");
        }
        Ok(restaurant)
    }

    /// Find all restaurants
    pub async fn find_all(&self) -> RepoResult<Vec<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM restaurants ORDER BY name")
            .await?
            .take(0)?;
        tracing::debug!(count = restaurants.len(), "Found restaurants");
        Ok(restaurants)
    }

    /// Find the restaurants with the given ids
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Restaurant>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM restaurants WHERE _id IN $ids ORDER BY name")
            .bind(("ids", ids.to_vec()))
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    /// Create a new restaurant
    pub async fn create(&self, restaurant: Restaurant) -> RepoResult<Restaurant> {
        self.base.insert(TABLE, &restaurant.id, &restaurant).await?;
        tracing::debug!(restaurant_id = %restaurant.id, "Restaurant created");
        Ok(restaurant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{memory_db, seed};
    use serde_json::json;

    #[tokio::test]
    async fn test_find_by_ids_filters() {
        let db = memory_db().await;
        seed(&db, TABLE, "r1", json!({"_id": "r1", "name": "Alpha"})).await;
        seed(&db, TABLE, "r2", json!({"_id": "r2", "name": "Beta"})).await;
        seed(&db, TABLE, "r3", json!({"_id": "r3", "name": "Gamma"})).await;
        let repo = RestaurantRepository::new(db);

        let found = repo
            .find_by_ids(&["r3".to_string(), "r1".to_string()])
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_sparse_restaurant_document() {
        let db = memory_db().await;
        seed(&db, TABLE, "r1", json!({"_id": "r1", "logoUrl": "https://x/logo.png"})).await;
        let repo = RestaurantRepository::new(db);

        let r = repo.find_by_id("r1").await.unwrap().unwrap();
        assert_eq!(r.name, "");
        assert_eq!(r.logo_url.as_deref(), Some("https://x/logo.png"));
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }
}
