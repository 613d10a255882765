//! Report Service - 销售报表
//!
//! 报表只统计已完成 (`order_delivered`) 的订单，完成时间为 `pickedUpAt`。
//! 日期边界按门店时区计算，门店不存在或时区无效时使用 UTC。
//! 金额以美元输出 (cents / 100)，税额从含税销售额倒推:
//! `tax = gross / (1 + rate) × rate`。

use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::prelude::*;
use shared::models::{DailySales, ItemSales, Order, OriginSales};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{LocationRepository, OrderRepository};
use crate::utils::time::{
    day_end_millis, day_start_millis, local_date_of, parse_date, resolve_timezone, today_in,
    trailing_dates,
};
use crate::utils::{AppError, AppResult};

const DEFAULT_SUMMARY_DAYS: i64 = 7;
const MAX_SUMMARY_DAYS: i64 = 366;

#[derive(Clone)]
pub struct ReportService {
    orders: OrderRepository,
    locations: LocationRepository,
    tax_rate: f64,
}

impl ReportService {
    pub fn new(db: Surreal<Db>, tax_rate: f64) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            locations: LocationRepository::new(db),
            tax_rate,
        }
    }

    /// 门店不属于该餐厅时按 UTC 计算
    async fn location_tz(&self, restaurant_id: &str, location_id: &str) -> AppResult<Tz> {
        let timezone = self
            .locations
            .find(restaurant_id, location_id)
            .await?
            .and_then(|l| l.timezone);
        Ok(resolve_timezone(timezone.as_deref()))
    }

    /// All orders created on a local date, newest first
    pub async fn order_history(
        &self,
        restaurant_id: &str,
        location_id: &str,
        date: &str,
    ) -> AppResult<Vec<Order>> {
        let date = parse_date(date)?;
        let tz = self.location_tz(restaurant_id, location_id).await?;
        Ok(self
            .orders
            .find_created_between(
                restaurant_id,
                location_id,
                day_start_millis(date, tz),
                day_end_millis(date, tz),
            )
            .await?)
    }

    /// Daily gross sales for the last `days` local dates (today included)
    pub async fn sales_summary(
        &self,
        restaurant_id: &str,
        location_id: &str,
        days: Option<i64>,
    ) -> AppResult<Vec<DailySales>> {
        let days = days.unwrap_or(DEFAULT_SUMMARY_DAYS);
        if !(1..=MAX_SUMMARY_DAYS).contains(&days) {
            return Err(AppError::validation(format!(
                "days must be between 1 and {}",
                MAX_SUMMARY_DAYS
            ))
            .with_detail("days", days));
        }

        let tz = self.location_tz(restaurant_id, location_id).await?;
        let dates = trailing_dates(today_in(tz), days as u32);
        let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
            return Ok(Vec::new());
        };

        let orders = self
            .orders
            .find_delivered_between(
                restaurant_id,
                location_id,
                day_start_millis(*first, tz),
                day_end_millis(*last, tz),
            )
            .await?;
        tracing::debug!(orders = orders.len(), days, "Building sales summary");

        Ok(summarize_daily(&orders, &dates, tz, self.tax_rate))
    }

    /// Sales per menu item on a local date
    pub async fn sales_by_item(
        &self,
        restaurant_id: &str,
        location_id: &str,
        date: &str,
    ) -> AppResult<Vec<ItemSales>> {
        let orders = self.delivered_on(restaurant_id, location_id, date).await?;
        Ok(aggregate_by_item(&orders))
    }

    /// Sales per origin on a local date
    pub async fn sales_by_origin(
        &self,
        restaurant_id: &str,
        location_id: &str,
        date: &str,
    ) -> AppResult<Vec<OriginSales>> {
        let orders = self.delivered_on(restaurant_id, location_id, date).await?;
        Ok(aggregate_by_origin(&orders))
    }

    async fn delivered_on(
        &self,
        restaurant_id: &str,
        location_id: &str,
        date: &str,
    ) -> AppResult<Vec<Order>> {
        let date = parse_date(date)?;
        let tz = self.location_tz(restaurant_id, location_id).await?;
        Ok(self
            .orders
            .find_delivered_between(
                restaurant_id,
                location_id,
                day_start_millis(date, tz),
                day_end_millis(date, tz),
            )
            .await?)
    }
}

// ========== Aggregation ==========

fn cents_to_dollars(cents: i64) -> Decimal {
    Decimal::from(cents) / Decimal::from(100)
}

fn to_money(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or_default()
}

/// Tax contained in a tax-inclusive gross amount
pub fn tax_from_gross(gross: Decimal, rate: f64) -> Decimal {
    let rate = Decimal::from_f64(rate).unwrap_or_default();
    let divisor = Decimal::ONE + rate;
    if divisor.is_zero() {
        return Decimal::ZERO;
    }
    gross / divisor * rate
}

/// One entry per date in `dates`, zero when nothing was delivered that day
pub fn summarize_daily(
    orders: &[Order],
    dates: &[NaiveDate],
    tz: Tz,
    rate: f64,
) -> Vec<DailySales> {
    let mut by_date: HashMap<NaiveDate, i64> = HashMap::new();
    for order in orders {
        if let Some(date) = local_date_of(order.completed_at(), tz) {
            let gross = by_date.entry(date).or_default();
            *gross = gross.saturating_add(order.total_cents);
        }
    }

    dates
        .iter()
        .map(|date| {
            let gross = cents_to_dollars(by_date.get(date).copied().unwrap_or(0));
            DailySales {
                date: date.format("%Y-%m-%d").to_string(),
                gross_sales: to_money(gross),
                tax: to_money(tax_from_gross(gross, rate)),
            }
        })
        .collect()
}

/// Group line items by menu item, highest gross first
pub fn aggregate_by_item(orders: &[Order]) -> Vec<ItemSales> {
    // menu_item_id -> (name, count, cents)
    let mut groups: HashMap<&str, (&str, i64, i64)> = HashMap::new();
    for item in orders.iter().flat_map(|o| o.items.iter()) {
        let entry = groups
            .entry(item.menu_item_id.as_str())
            .or_insert((item.name.as_str(), 0, 0));
        entry.1 = entry.1.saturating_add(item.quantity);
        entry.2 = entry.2.saturating_add(item.line_total_cents());
    }

    let mut rows: Vec<(i64, ItemSales)> = groups
        .into_iter()
        .map(|(id, (name, count, cents))| {
            (
                cents,
                ItemSales {
                    menu_item_id: id.to_string(),
                    item_name: name.to_string(),
                    sold_count: count,
                    gross_sales: to_money(cents_to_dollars(cents)),
                },
            )
        })
        .collect();
    rows.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.menu_item_id.cmp(&b.1.menu_item_id))
    });
    rows.into_iter().map(|(_, row)| row).collect()
}

/// Group orders by origin, highest gross first
///
/// `soldCount` counts items, not orders.
pub fn aggregate_by_origin(orders: &[Order]) -> Vec<OriginSales> {
    let mut groups: HashMap<&str, (&str, i64, i64)> = HashMap::new();
    for order in orders {
        let entry = groups
            .entry(order.origin.id.as_str())
            .or_insert((order.origin.name.as_str(), 0, 0));
        entry.1 = entry.1.saturating_add(order.item_count());
        entry.2 = entry.2.saturating_add(order.total_cents);
    }

    let mut rows: Vec<(i64, OriginSales)> = groups
        .into_iter()
        .map(|(id, (name, count, cents))| {
            (
                cents,
                OriginSales {
                    origin_id: id.to_string(),
                    name: name.to_string(),
                    sold_count: count,
                    gross_sales: to_money(cents_to_dollars(cents)),
                },
            )
        })
        .collect();
    rows.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.origin_id.cmp(&b.1.origin_id)));
    rows.into_iter().map(|(_, row)| row).collect()
}
