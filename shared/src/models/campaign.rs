//! Campaign Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::serde_helpers::null_default;

/// Campaign document (table `campaigns`)
///
/// 活动内容 (name, type, reward ...) 由管理端维护，这里只透传。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub restaurant_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub location_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
