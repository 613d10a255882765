//! Location Repository

use super::{BaseRepository, RepoResult};
use shared::models::Location;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "locations";

#[derive(Clone)]
pub struct LocationRepository {
    base: BaseRepository,
}

impl LocationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a location that belongs to `restaurant_id`
    pub async fn find(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> RepoResult<Option<Location>> {
        let location: Option<Location> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM type::thing('locations', $id) WHERE restaurantId = $rid")
            .bind(("id", location_id.to_string()))
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        if location.is_none() {
            tracing::debug!(
                restaurant_id = %restaurant_id,
                location_id = %location_id,
                "Location not found for restaurant"
            );
        }
        Ok(location)
    }

    /// Find all locations of a restaurant
    pub async fn find_by_restaurant(&self, restaurant_id: &str) -> RepoResult<Vec<Location>> {
        let locations: Vec<Location> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM locations WHERE restaurantId = $rid ORDER BY name")
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        tracing::debug!(restaurant_id = %restaurant_id, count = locations.len(), "Found locations");
        Ok(locations)
    }

    /// Create a new location
    pub async fn create(&self, location: Location) -> RepoResult<Location> {
        self.base.insert(TABLE, &location.id, &location).await?;
        tracing::debug!(location_id = %location.id, "Location created");
        Ok(location)
    }
}
