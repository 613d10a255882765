//! User Service - 用户同步 (外部身份 → 内部用户)

use serde_json::{Map, json};
use shared::models::{CreateUserRequest, CreateUserResponse, User};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{RepoError, UserRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 并发创建冲突后重新读取的次数
const UPSERT_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    /// Create or update a user by external id
    ///
    /// 已存在的用户只补全为空的联系方式，不覆盖已有值。`userId` 上的唯一索引
    /// 保证并发创建只会成功一次，失败的一方按已存在处理。
    pub async fn upsert_user(&self, request: CreateUserRequest) -> AppResult<CreateUserResponse> {
        if !request.has_contact() {
            return Err(AppError::new(ErrorCode::UserContactRequired));
        }

        for _ in 0..UPSERT_ATTEMPTS {
            if let Some(existing) = self.users.find_by_user_id(&request.user_id).await? {
                self.fill_contact(&existing, &request).await?;
                return Ok(CreateUserResponse {
                    user_id: existing.id,
                });
            }

            match self.users.create(new_user(&request)).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.user_id, id = %user.id, "User created");
                    return Ok(CreateUserResponse { user_id: user.id });
                }
                Err(RepoError::Duplicate(_) | RepoError::Conflict(_)) => {
                    tracing::debug!(
                        user_id = %request.user_id,
                        "User created concurrently, re-reading"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::conflict(format!(
            "User {} is being modified concurrently",
            request.user_id
        )))
    }

    async fn fill_contact(&self, existing: &User, request: &CreateUserRequest) -> AppResult<()> {
        let patch = contact_patch(existing, request);
        if patch.is_empty() {
            return Ok(());
        }
        self.users
            .fill_contact(
                &existing.user_id,
                patch.get("email").and_then(|v| v.as_str()),
                patch.get("phoneNumber").and_then(|v| v.as_str()),
                now_millis(),
            )
            .await?;
        tracing::info!(user_id = %existing.user_id, "User contact updated");
        Ok(())
    }

    /// Delete a user, succeeds when the user is already gone
    pub async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        self.users.delete_by_user_id(user_id).await?;
        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}

fn new_user(request: &CreateUserRequest) -> User {
    let now = now_millis();
    User {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: request.user_id.clone(),
        email: request.email.clone().filter(|e| !e.is_empty()),
        phone_number: request.phone_number.clone().filter(|p| !p.is_empty()),
        restaurants: Vec::new(),
        created_at: Some(request.created_at.unwrap_or(now)),
        updated_at: Some(now),
    }
}

/// Contact fields that are empty on `existing` and provided by `request`
fn contact_patch(existing: &User, request: &CreateUserRequest) -> Map<String, serde_json::Value> {
    let mut patch = Map::new();
    if !existing.has_email()
        && let Some(email) = request.email.as_deref().filter(|e| !e.is_empty())
    {
        patch.insert("email".into(), json!(email));
    }
    if !existing.has_phone()
        && let Some(phone) = request.phone_number.as_deref().filter(|p| !p.is_empty())
    {
        patch.insert("phoneNumber".into(), json!(phone));
    }
    patch
}
