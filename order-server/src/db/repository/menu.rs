//! Menu Repository

use super::{BaseRepository, RepoError, RepoResult, retry_on_conflict};
use shared::models::{MenuDocument, StoredCategory};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menus";

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a menu of a location by id
    pub async fn find(
        &self,
        restaurant_id: &str,
        location_id: &str,
        menu_id: &str,
    ) -> RepoResult<Option<MenuDocument>> {
        let menu: Option<MenuDocument> = self
            .base
            .db()
            .query(
                "SELECT * OMIT id FROM type::thing('menus', $id) \
                 WHERE restaurantId = $rid AND locationId = $lid",
            )
            .bind(("id", menu_id.to_string()))
            .bind(("rid", restaurant_id.to_string()))
            .bind(("lid", location_id.to_string()))
            .await?
            .take(0)?;
        if menu.is_none() {
            tracing::debug!(menu_id = %menu_id, "Menu not found");
        }
        Ok(menu)
    }

    /// Find menu by id only (pricing looks up the tax rate this way)
    pub async fn find_by_id(&self, menu_id: &str) -> RepoResult<Option<MenuDocument>> {
        self.base.find_by_key(TABLE, menu_id).await
    }

    /// Find all menus of a location
    pub async fn find_by_location(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> RepoResult<Vec<MenuDocument>> {
        let menus: Vec<MenuDocument> = self
            .base
            .db()
            .query(
                "SELECT * OMIT id FROM menus \
                 WHERE restaurantId = $rid AND locationId = $lid ORDER BY menuSlug",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("lid", location_id.to_string()))
            .await?
            .take(0)?;
        tracing::debug!(location_id = %location_id, count = menus.len(), "Found menus");
        Ok(menus)
    }

    /// Create a new menu
    pub async fn create(&self, menu: MenuDocument) -> RepoResult<MenuDocument> {
        if self.find_by_id(&menu.id).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Menu '{}' already exists",
                menu.menu_slug
            )));
        }
        self.base.insert(TABLE, &menu.id, &menu).await?;
        tracing::debug!(menu_id = %menu.id, "Menu created");
        Ok(menu)
    }

    /// Append a category in one statement
    ///
    /// `sortOrder` 为空时取当前分类数 + 1。菜单不存在 (或不属于该门店) 时返回 `false`。
    pub async fn append_category(
        &self,
        restaurant_id: &str,
        location_id: &str,
        menu_id: &str,
        category: &StoredCategory,
    ) -> RepoResult<bool> {
        retry_on_conflict(move || async move {
            let updated: Vec<serde_json::Value> = self
                .base
                .db()
                .query(
                    "UPDATE type::thing('menus', $id) SET \
                     categories = array::append(categories ?? [], { \
                         id: $cat.id, \
                         name: $cat.name, \
                         description: $cat.description, \
                         sortOrder: $cat.sortOrder ?? (array::len(categories ?? []) + 1), \
                         emoji: $cat.emoji \
                     }), \
                     updatedAt = $now \
                     WHERE restaurantId = $rid AND locationId = $lid RETURN _id",
                )
                .bind(("id", menu_id.to_string()))
                .bind(("rid", restaurant_id.to_string()))
                .bind(("lid", location_id.to_string()))
                .bind(("cat", category.clone()))
                .bind(("now", now_millis()))
                .await?
                .take(0)?;
            Ok(!updated.is_empty())
        })
        .await
    }

    /// Replace the category with the same id in one statement
    ///
    /// 菜单或分类不存在时返回 `false`。
    pub async fn update_category(
        &self,
        restaurant_id: &str,
        location_id: &str,
        menu_id: &str,
        category: &StoredCategory,
    ) -> RepoResult<bool> {
        retry_on_conflict(move || async move {
            let updated: Vec<serde_json::Value> = self
                .base
                .db()
                .query(
                    "UPDATE type::thing('menus', $id) SET \
                     categories = array::concat( \
                         array::slice(categories, 0, array::find_index(categories.id, $cat.id)), \
                         [$cat], \
                         array::slice(categories, array::find_index(categories.id, $cat.id) + 1) \
                     ), \
                     updatedAt = $now \
                     WHERE restaurantId = $rid AND locationId = $lid \
                     AND $cat.id IN categories.id RETURN _id",
                )
                .bind(("id", menu_id.to_string()))
                .bind(("rid", restaurant_id.to_string()))
                .bind(("lid", location_id.to_string()))
                .bind(("cat", category.clone()))
                .bind(("now", now_millis()))
                .await?
                .take(0)?;
            Ok(!updated.is_empty())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{memory_db, seed};
    use serde_json::json;

    #[tokio::test]
    async fn test_find_scoped_to_location() {
        let db = memory_db().await;
        seed(
            &db,
            TABLE,
            "m1",
            json!({"_id": "m1", "restaurantId": "r1", "locationId": "l1", "menuSlug": "lunch"}),
        )
        .await;
        let repo = MenuRepository::new(db);

        assert!(repo.find("r1", "l1", "m1").await.unwrap().is_some());
        assert!(repo.find("r1", "l2", "m1").await.unwrap().is_none());
        assert!(repo.find("r1", "l1", "nope").await.unwrap().is_none());
        assert_eq!(repo.find_by_location("r1", "l1").await.unwrap().len(), 1);
        assert!(repo.find_by_location("r1", "l2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_and_append_categories() {
        let repo = MenuRepository::new(memory_db().await);
        let menu = MenuDocument {
            id: "r1_menu_lunch".into(),
            restaurant_id: "r1".into(),
            location_id: "l1".into(),
            menu_slug: "lunch".into(),
            ..Default::default()
        };
        repo.create(menu.clone()).await.unwrap();
        assert!(matches!(
            repo.create(menu).await.unwrap_err(),
            RepoError::Duplicate(_)
        ));

        let category = StoredCategory {
            id: "c1".into(),
            sort_order: None,
            ..Default::default()
        };
        assert!(repo.append_category("r1", "l1", "r1_menu_lunch", &category).await.unwrap());
        let category = StoredCategory {
            id: "c2".into(),
            sort_order: Some(7),
            ..Default::default()
        };
        assert!(repo.append_category("r1", "l1", "r1_menu_lunch", &category).await.unwrap());

        let saved = repo.find_by_id("r1_menu_lunch").await.unwrap().unwrap();
        assert_eq!(saved.categories.len(), 2);
        assert_eq!(saved.categories[0].id, "c1");
        assert_eq!(saved.categories[0].sort_order, Some(1));
        assert_eq!(saved.categories[1].sort_order, Some(7));
        assert!(saved.updated_at.is_some());

        // 其它门店 / 不存在的菜单
        assert!(!repo.append_category("r1", "l2", "r1_menu_lunch", &category).await.unwrap());
        assert!(!repo.append_category("r1", "l1", "missing", &category).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_category_in_place() {
        let db = memory_db().await;
        seed(
            &db,
            TABLE,
            "m1",
            json!({
                "_id": "m1", "restaurantId": "r1", "locationId": "l1", "menuSlug": "lunch",
                "categories": [
                    {"id": "c1", "sortOrder": 1},
                    {"id": "c2", "sortOrder": 2, "emoji": "x"}
                ]
            }),
        )
        .await;
        let repo = MenuRepository::new(db);

        let category = StoredCategory {
            id: "c2".into(),
            sort_order: Some(5),
            ..Default::default()
        };
        assert!(repo.update_category("r1", "l1", "m1", &category).await.unwrap());
        let saved = repo.find_by_id("m1").await.unwrap().unwrap();
        assert_eq!(saved.categories.len(), 2);
        assert_eq!(saved.categories[0].sort_order, Some(1));
        assert_eq!(saved.categories[1].id, "c2");
        assert_eq!(saved.categories[1].sort_order, Some(5));
        assert_eq!(saved.categories[1].emoji, None);

        let unknown = StoredCategory {
            id: "nope".into(),
            ..Default::default()
        };
        assert!(!repo.update_category("r1", "l1", "m1", &unknown).await.unwrap());
        assert!(!repo.update_category("r2", "l1", "m1", &category).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_every_category() {
        let db = memory_db().await;
        seed(
            &db,
            TABLE,
            "m1",
            json!({"_id": "m1", "restaurantId": "r1", "locationId": "l1", "menuSlug": "lunch"}),
        )
        .await;
        let repo = MenuRepository::new(db);

        let writers = (0..8).map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                let category = StoredCategory {
                    id: format!("c{i}"),
                    ..Default::default()
                };
                repo.append_category("r1", "l1", "m1", &category).await
            })
        });
        for handle in writers.collect::<Vec<_>>() {
            assert!(handle.await.unwrap().unwrap());
        }

        let saved = repo.find_by_id("m1").await.unwrap().unwrap();
        assert_eq!(saved.categories.len(), 8);
        let mut orders: Vec<i32> = saved.categories.iter().filter_map(|c| c.sort_order).collect();
        orders.sort();
        assert_eq!(orders, (1..=8).collect::<Vec<_>>());
    }
}
