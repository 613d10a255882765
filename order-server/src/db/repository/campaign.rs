//! Campaign Repository

use super::{BaseRepository, RepoResult};
use shared::models::Campaign;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct CampaignRepository {
    base: BaseRepository,
}

impl CampaignRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find campaigns of a location, newest first
    pub async fn find_by_location(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> RepoResult<Vec<Campaign>> {
        let campaigns: Vec<Campaign> = self
            .base
            .db()
            .query(
                "SELECT * OMIT id FROM campaigns \
                 WHERE restaurantId = $rid AND locationId = $lid ORDER BY createdAt DESC",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("lid", location_id.to_string()))
            .await?
            .take(0)?;
        Ok(campaigns)
    }
}
