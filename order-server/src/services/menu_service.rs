//! Menu Service - 菜单查询、创建和分类维护

use shared::models::{
    CategoryUpsert, LocalizedText, MenuCreate, MenuDocument, MenuResponse, MenuSummary,
    StoredCategory,
};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{MenuRepository, RepoError};
use crate::transformers::{transform_menu, transform_menu_summary};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 新菜单未指定税率时的默认值 (百分比)
const DEFAULT_MENU_SALES_TAX: f64 = 10.25;

#[derive(Clone)]
pub struct MenuService {
    menus: MenuRepository,
}

impl MenuService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            menus: MenuRepository::new(db),
        }
    }

    /// Menu summaries of a location (empty list when none)
    pub async fn list_summaries(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> AppResult<Vec<MenuSummary>> {
        let menus = self.menus.find_by_location(restaurant_id, location_id).await?;
        Ok(menus.iter().map(transform_menu_summary).collect())
    }

    /// Full menu in the client format
    pub async fn get_menu(
        &self,
        restaurant_id: &str,
        location_id: &str,
        menu_id: &str,
    ) -> AppResult<MenuResponse> {
        let menu = self
            .menus
            .find(restaurant_id, location_id, menu_id)
            .await?
            .ok_or_else(|| menu_not_found(menu_id))?;
        Ok(transform_menu(&menu))
    }

    /// Create an empty menu with id `{restaurantId}_menu_{menuSlug}`
    pub async fn create_menu(
        &self,
        restaurant_id: &str,
        location_id: &str,
        payload: MenuCreate,
    ) -> AppResult<MenuSummary> {
        let now = now_millis();
        let menu = MenuDocument {
            id: format!("{}_menu_{}", restaurant_id, payload.menu_slug),
            restaurant_id: restaurant_id.to_string(),
            location_id: location_id.to_string(),
            menu_slug: payload.menu_slug,
            name: Some(LocalizedText::from(payload.name)),
            description: None,
            sales_tax: Some(payload.sales_tax.unwrap_or(DEFAULT_MENU_SALES_TAX)),
            available: Some(payload.available.unwrap_or(true)),
            categories: Vec::new(),
            items: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let menu = self.menus.create(menu).await.map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::MenuSlugExists),
            other => other.into(),
        })?;
        tracing::info!(menu_id = %menu.id, "Menu created");
        Ok(transform_menu_summary(&menu))
    }

    /// Update a category in place (`id` given) or append a new one
    ///
    /// 单条语句完成读改写，并发请求不会互相覆盖。
    pub async fn upsert_category(
        &self,
        restaurant_id: &str,
        location_id: &str,
        menu_id: &str,
        payload: CategoryUpsert,
    ) -> AppResult<()> {
        let category = category_from_upsert(payload);
        if category.id.is_empty() {
            let category = StoredCategory {
                id: uuid::Uuid::new_v4().to_string(),
                ..category
            };
            let appended = self
                .menus
                .append_category(restaurant_id, location_id, menu_id, &category)
                .await?;
            if !appended {
                return Err(menu_not_found(menu_id));
            }
            tracing::info!(menu_id = %menu_id, category_id = %category.id, "Category added");
            return Ok(());
        }

        let updated = self
            .menus
            .update_category(restaurant_id, location_id, menu_id, &category)
            .await?;
        if !updated {
            // 区分菜单不存在和分类不存在
            self.menus
                .find(restaurant_id, location_id, menu_id)
                .await?
                .ok_or_else(|| menu_not_found(menu_id))?;
            return Err(AppError::new(ErrorCode::CategoryNotFound)
                .with_detail("categoryId", category.id));
        }
        tracing::info!(menu_id = %menu_id, category_id = %category.id, "Category updated");
        Ok(())
    }
}

fn menu_not_found(menu_id: &str) -> AppError {
    AppError::new(ErrorCode::MenuNotFound).with_detail("menuId", menu_id)
}

/// 请求体 → 存储格式；`sortOrder == 0` 的新分类交给数据库排到最后
pub fn category_from_upsert(payload: CategoryUpsert) -> StoredCategory {
    let id = payload.id.filter(|id| !id.is_empty()).unwrap_or_default();
    let sort_order = match (id.is_empty(), payload.sort_order) {
        (true, 0) => None,
        (_, sort_order) => Some(sort_order),
    };
    StoredCategory {
        id,
        name: Some(LocalizedText::from(payload.name)),
        description: Some(LocalizedText::from(payload.description)),
        sort_order,
        emoji: payload.emoji,
    }
}
