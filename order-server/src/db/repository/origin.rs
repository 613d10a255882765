//! Origin Repository

use super::{BaseRepository, RepoResult};
use shared::models::Origin;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "origins";

#[derive(Clone)]
pub struct OriginRepository {
    base: BaseRepository,
}

impl OriginRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find origin by id (QR code scan)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Origin>> {
        let origin = self.base.find_by_key(TABLE, id).await?;
        if origin.is_none() {
            tracing::debug!(origin_id = %id, "Origin not found");
        }
        Ok(origin)
    }

    /// Find all origins of a location
    pub async fn find_by_location(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> RepoResult<Vec<Origin>> {
        let origins: Vec<Origin> = self
            .base
            .db()
            .query(
                "SELECT * OMIT id FROM origins \
                 WHERE restaurantId = $rid AND locationId = $lid ORDER BY label",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("lid", location_id.to_string()))
            .await?
            .take(0)?;
        Ok(origins)
    }
}
