//! User Repository

use super::{BaseRepository, RepoResult, retry_on_conflict};
use serde_json::Value;
use shared::models::User;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by external identity id
    pub async fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM users WHERE userId = $uid LIMIT 1")
            .bind(("uid", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn create(&self, user: User) -> RepoResult<User> {
        self.base.insert(TABLE, &user.id, &user).await?;
        tracing::debug!(user_id = %user.user_id, "User created");
        Ok(user)
    }

    /// Fill empty contact fields of a user in one statement
    ///
    /// 已有的 email / phoneNumber 不会被覆盖。
    pub async fn fill_contact(
        &self,
        user_id: &str,
        email: Option<&str>,
        phone_number: Option<&str>,
        now: i64,
    ) -> RepoResult<()> {
        retry_on_conflict(move || async move {
            self.base
                .db()
                .query(
                    "UPDATE users SET \
                     email = IF email THEN email ELSE $email ?? email END, \
                     phoneNumber = IF phoneNumber THEN phoneNumber ELSE $phone ?? phoneNumber END, \
                     updatedAt = $now \
                     WHERE userId = $uid RETURN NONE",
                )
                .bind(("uid", user_id.to_string()))
                .bind(("email", email.map(str::to_string)))
                .bind(("phone", phone_number.map(str::to_string)))
                .bind(("now", now))
                .await?
                .check()?;
            Ok(())
        })
        .await
    }

    /// Append a restaurant to the user's ownership list
    ///
    /// 用户不存在时返回 `false`。
    pub async fn add_restaurant(
        &self,
        user_id: &str,
        restaurant_id: &str,
        now: i64,
    ) -> RepoResult<bool> {
        retry_on_conflict(move || async move {
            let updated: Vec<Value> = self
                .base
                .db()
                .query(
                    "UPDATE users SET restaurants = array::union(restaurants ?? [], [$rid]), \
                     updatedAt = $now WHERE userId = $uid RETURN _id",
                )
                .bind(("uid", user_id.to_string()))
                .bind(("rid", restaurant_id.to_string()))
                .bind(("now", now))
                .await?
                .take(0)?;
            Ok(!updated.is_empty())
        })
        .await
    }

    /// Delete by external identity id
    pub async fn delete_by_user_id(&self, user_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE users WHERE userId = $uid")
            .bind(("uid", user_id.to_string()))
            .await?
            .check()?;
        tracing::debug!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
