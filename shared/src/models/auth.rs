//! Mock passwordless auth records and responses
//!
//! 响应体沿用前端 SDK 依赖的 `{status, ...}` 结构，不套用 `ApiResponse`。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wrong codes allowed before the code is discarded
pub const MAX_CODE_INPUT_ATTEMPTS: u32 = 5;

/// One-time code (table `auth_codes`), keyed by phone number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCode {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone_number: String,
    pub code: String,
    pub pre_auth_session_id: String,
    #[serde(default)]
    pub failed_attempts: u32,
    pub created_at: i64,
}

/// Session (table `sessions`), keyed by session handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub phone_number: String,
    pub created_at: i64,
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCodeRequest {
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumeCodeRequest {
    #[serde(default)]
    pub device_id: Option<String>,
    pub pre_auth_session_id: String,
    #[serde(default)]
    pub user_input_code: Option<String>,
    #[serde(default)]
    pub link_code: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub handle: String,
    pub user_id: String,
    #[serde(rename = "userDataInJWT")]
    pub user_data_in_jwt: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub phone_number: String,
    pub time_joined: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "status",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum CreateCodeResponse {
    Ok {
        device_id: String,
        pre_auth_session_id: String,
        flow_type: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "status",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ConsumeCodeResponse {
    Ok {
        created_new_user: bool,
        user: AuthUser,
        session: SessionInfo,
    },
    IncorrectUserInputCodeError {
        failed_code_input_attempt_count: u32,
        maximum_code_input_attempts: u32,
    },
    RestartFlowError,
}

/// Refresh / sign-out / verify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "status",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum SessionResponse {
    Ok {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session: Option<SessionInfo>,
    },
    Unauthorised,
}
