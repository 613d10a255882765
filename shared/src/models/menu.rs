//! Menu Model
//!
//! `Stored*` 类型对应数据库中的原始文档 (字段可缺失)，
//! `*Response` 类型是客户端约定的严格结构。

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::multilingual::{LocalizedText, Multilingual};
use super::serde_helpers::null_default;

// =============================================================================
// Stored documents
// =============================================================================

/// Menu document (table `menus`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub restaurant_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub location_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub menu_slug: String,
    #[serde(default)]
    pub name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub sales_tax: Option<f64>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default, deserialize_with = "null_default")]
    pub categories: Vec<StoredCategory>,
    #[serde(default, deserialize_with = "null_default")]
    pub items: Vec<StoredMenuItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Category embedded in a menu
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCategory {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default)]
    pub name: Option<LocalizedText>,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// Menu item embedded in a menu
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMenuItem {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default)]
    pub name: Option<LocalizedText>,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_default")]
    pub category_id: String,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub making_cost_cents: Option<i64>,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "null_default")]
    pub station_tags: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub variants: Vec<StoredVariant>,
    #[serde(default, deserialize_with = "null_default")]
    pub modifiers: Vec<StoredModifier>,
}

/// Variant (size, portion) of a menu item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredVariant {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub default: Option<bool>,
}

/// Modifier group of a menu item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredModifier {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default)]
    pub name: Option<LocalizedText>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub selection_mode: Option<String>,
    #[serde(default)]
    pub max_choices: Option<i64>,
    #[serde(default)]
    pub free_choices: Option<i64>,
    #[serde(default)]
    pub extra_choice_price_cents: Option<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub options: Vec<StoredModifierOption>,
}

/// Option inside a modifier group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredModifierOption {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default)]
    pub name: Option<LocalizedText>,
    #[serde(default)]
    pub price_cents: Option<i64>,
}

// =============================================================================
// Responses
// =============================================================================

/// Full menu as rendered to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub restaurant_id: String,
    pub location_id: String,
    pub menu_slug: String,
    pub name: Multilingual,
    pub categories: Vec<CategoryResponse>,
    pub items: Vec<MenuItemResponse>,
    pub sales_tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: Multilingual,
    pub description: Multilingual,
    pub sort_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: String,
    pub name: Multilingual,
    pub description: Multilingual,
    pub image_urls: Vec<String>,
    pub category_id: String,
    pub price_cents: i64,
    pub making_cost_cents: i64,
    pub is_available: bool,
    pub station_tags: Vec<String>,
    pub variants: Vec<VariantResponse>,
    pub modifiers: Vec<ModifierResponse>,
}

/// Variant names stay plain strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantResponse {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierResponse {
    pub id: String,
    pub name: Multilingual,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub selection_mode: String,
    pub max_choices: i64,
    pub free_choices: i64,
    pub extra_choice_price_cents: i64,
    pub options: Vec<ModifierOptionResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierOptionResponse {
    pub id: String,
    pub name: Multilingual,
    pub price_cents: i64,
}

/// Menu summary for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub menu_slug: String,
    pub name: Multilingual,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Multilingual>,
    pub available: bool,
}

// =============================================================================
// Requests
// =============================================================================

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuCreate {
    #[validate(length(min = 1, max = 100))]
    pub menu_slug: String,
    pub name: Multilingual,
    #[validate(range(min = 0.0))]
    pub sales_tax: Option<f64>,
    pub available: Option<bool>,
}

/// Create-or-update category payload (`id` present = update)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpsert {
    pub id: Option<String>,
    pub name: Multilingual,
    pub description: Multilingual,
    #[validate(range(min = 0))]
    pub sort_order: i32,
    pub emoji: Option<String>,
}
