//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers::null_default;

/// User document (table `users`)
///
/// `userId` 是外部身份系统的 id，`_id` 是内部 id。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Ids of the restaurants this user owns
    #[serde(default, deserialize_with = "null_default")]
    pub restaurants: Vec<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl User {
    pub fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
    }

    pub fn has_phone(&self) -> bool {
        self.phone_number.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// `POST /users/create-user`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Unix millis
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl CreateUserRequest {
    pub fn has_contact(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
            || self.phone_number.as_deref().is_some_and(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user_id: String,
}

/// `POST /users/delete-user`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
}
