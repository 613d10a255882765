//! Report rows
//!
//! 金额单位是美元 (f64)，只用于展示。

use serde::{Deserialize, Serialize};

/// One local calendar day of the sales summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// `YYYY-MM-DD` in the location's timezone
    pub date: String,
    pub gross_sales: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSales {
    pub menu_item_id: String,
    pub item_name: String,
    pub sold_count: i64,
    pub gross_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginSales {
    pub origin_id: String,
    pub name: String,
    /// Items sold, not orders
    pub sold_count: i64,
    pub gross_sales: f64,
}

/// `?days=N` of the sales summary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesSummaryQuery {
    pub days: Option<i64>,
}
