//! Station Repository

use super::{BaseRepository, RepoResult};
use shared::models::Station;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct StationRepository {
    base: BaseRepository,
}

impl StationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all kitchen stations of a location
    pub async fn find_by_location(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> RepoResult<Vec<Station>> {
        let stations: Vec<Station> = self
            .base
            .db()
            .query(
                "SELECT * OMIT id FROM stations \
                 WHERE restaurantId = $rid AND locationId = $lid ORDER BY name",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("lid", location_id.to_string()))
            .await?
            .take(0)?;
        Ok(stations)
    }
}
