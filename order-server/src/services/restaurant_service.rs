//! Restaurant Service - 餐厅、门店、来源 (二维码)、工位、打印机、活动查询

use serde_json::Value;
use shared::models::{
    Campaign, Location, LocationCreate, LocationDetails, LocationListing, OriginDetails,
    OriginListing, Restaurant, RestaurantCreate, RestaurantSummary, Station,
};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{
    CampaignRepository, LocationRepository, OriginRepository, RestaurantRepository,
    StationRepository, UserRepository,
};
use crate::transformers::{
    transform_location, transform_location_listing, transform_origin, transform_restaurant,
};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone)]
pub struct RestaurantService {
    restaurants: RestaurantRepository,
    locations: LocationRepository,
    origins: OriginRepository,
    stations: StationRepository,
    campaigns: CampaignRepository,
    users: UserRepository,
}

impl RestaurantService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            restaurants: RestaurantRepository::new(db.clone()),
            locations: LocationRepository::new(db.clone()),
            origins: OriginRepository::new(db.clone()),
            stations: StationRepository::new(db.clone()),
            campaigns: CampaignRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    // ========== Restaurant ==========

    pub async fn get_restaurant(&self, restaurant_id: &str) -> AppResult<RestaurantSummary> {
        let restaurant = self.find_restaurant(restaurant_id).await?;
        Ok(transform_restaurant(&restaurant))
    }

    async fn find_restaurant(&self, restaurant_id: &str) -> AppResult<Restaurant> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::RestaurantNotFound)
                    .with_detail("restaurantId", restaurant_id)
            })
    }

    /// Restaurants owned by a user
    ///
    /// 用户不存在或没有归属列表时返回全部餐厅。
    pub async fn restaurants_for_user(&self, user_id: &str) -> AppResult<Vec<RestaurantSummary>> {
        let owned = self
            .users
            .find_by_user_id(user_id)
            .await?
            .map(|u| u.restaurants)
            .unwrap_or_default();

        let restaurants = if owned.is_empty() {
            self.restaurants.find_all().await?
        } else {
            self.restaurants.find_by_ids(&owned).await?
        };
        Ok(restaurants.iter().map(transform_restaurant).collect())
    }

    /// Create a restaurant and attach it to the user (if the user exists)
    pub async fn create_restaurant(
        &self,
        user_id: &str,
        payload: RestaurantCreate,
    ) -> AppResult<RestaurantSummary> {
        let now = now_millis();
        let restaurant = Restaurant {
            id: uuid::Uuid::new_v4().to_string(),
            name: payload.name.unwrap_or_else(|| "New Restaurant".into()),
            concept: payload.concept.unwrap_or_else(|| "Restaurant".into()),
            logo: Some(payload.logo.unwrap_or_default()),
            logo_url: None,
            created_at: Some(now),
        };
        let restaurant = self.restaurants.create(restaurant).await?;

        let attached = self
            .users
            .add_restaurant(user_id, &restaurant.id, now)
            .await?;
        if !attached {
            tracing::warn!(
                user_id = %user_id,
                restaurant_id = %restaurant.id,
                "User not found, restaurant left unassigned"
            );
        }

        tracing::info!(restaurant_id = %restaurant.id, "Restaurant created");
        Ok(transform_restaurant(&restaurant))
    }

    // ========== Location ==========

    /// 门店必须属于该餐厅，否则按不存在处理
    pub async fn find_location(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> AppResult<Location> {
        self.locations
            .find(restaurant_id, location_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::LocationNotFound)
                    .with_detail("restaurantId", restaurant_id)
                    .with_detail("locationId", location_id)
            })
    }

    /// Location details for the ordering app
    pub async fn get_location(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> AppResult<LocationDetails> {
        let location = self.find_location(restaurant_id, location_id).await?;
        Ok(transform_location(&location))
    }

    pub async fn list_locations(&self, restaurant_id: &str) -> AppResult<Vec<LocationListing>> {
        let locations = self.locations.find_by_restaurant(restaurant_id).await?;
        Ok(locations.iter().map(transform_location_listing).collect())
    }

    pub async fn create_location(
        &self,
        restaurant_id: &str,
        payload: LocationCreate,
    ) -> AppResult<LocationListing> {
        self.find_restaurant(restaurant_id).await?;

        let location = Location {
            id: uuid::Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: payload.name.unwrap_or_else(|| "New Location".into()),
            location_slug: payload.location_slug,
            address: if payload.address.is_null() {
                serde_json::json!({})
            } else {
                payload.address
            },
            timezone: payload.timezone,
            is_active: Some(true),
            created_at: Some(now_millis()),
            ..Default::default()
        };
        let location = self.locations.create(location).await?;
        tracing::info!(
            restaurant_id = %restaurant_id,
            location_id = %location.id,
            "Location created"
        );
        Ok(transform_location_listing(&location))
    }

    /// Printers embedded in the location document
    pub async fn list_printers(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> AppResult<Vec<Value>> {
        let location = self.find_location(restaurant_id, location_id).await?;
        Ok(location.printers)
    }

    // ========== Origin ==========

    pub async fn get_origin(&self, origin_id: &str) -> AppResult<OriginDetails> {
        let origin = self.origins.find_by_id(origin_id).await?.ok_or_else(|| {
            AppError::new(ErrorCode::OriginNotFound).with_detail("originId", origin_id)
        })?;
        Ok(transform_origin(&origin))
    }

    /// Origins of a location plus its QR code styling
    ///
    /// 门店不存在 (或不属于该餐厅) 时二维码样式为空。
    pub async fn list_origins(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> AppResult<OriginListing> {
        let location = self.locations.find(restaurant_id, location_id).await?;
        let origins = self.origins.find_by_location(restaurant_id, location_id).await?;
        let (qr_code_style, qr_code_image) = location
            .map(|l| (l.qr_code_style, l.qr_code_image))
            .unwrap_or_default();
        Ok(OriginListing {
            qr_code_style,
            qr_code_image,
            origin_data: origins,
        })
    }

    // ========== Station / Campaign ==========

    /// Kitchen stations of a location, 404 when there are none
    pub async fn list_stations(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> AppResult<Vec<Station>> {
        let stations = self.stations.find_by_location(restaurant_id, location_id).await?;
        if stations.is_empty() {
            return Err(AppError::new(ErrorCode::StationNotFound)
                .with_detail("locationId", location_id));
        }
        Ok(stations)
    }

    pub async fn list_campaigns(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> AppResult<Vec<Campaign>> {
        Ok(self.campaigns.find_by_location(restaurant_id, location_id).await?)
    }
}
