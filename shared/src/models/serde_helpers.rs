//! Serde helpers for loosely shaped documents
//!
//! 存储的文档没有 schema 约束，字段可能缺失或为 null，
//! 这些 helper 在读取时统一填充默认值。

use serde::{Deserialize, Deserializer};

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// Deserialize bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// Deserialize any `Default` value that treats null as default
///
/// 用于 `Vec<T>` / `String` 字段：`#[serde(default, deserialize_with = "null_default")]`
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Default value helper for `#[serde(default = "...")]`
pub fn default_true() -> bool {
    true
}
