//! Order-Level Price Calculator

use rust_decimal::prelude::*;
use shared::models::{Discount, OrderItem, OrderItemInput};

use super::item_calculator::price_item;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Priced order: frozen items plus totals
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals {
    pub items: Vec<OrderItem>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    /// subtotal + tax − discount (not clamped)
    pub total_cents: i64,
}

/// Normalize a stored sales tax to a fraction
///
/// 菜单里的税率有两种写法: `0.1025` 或 `10.25` (百分比)。
pub fn normalize_tax_rate(sales_tax: f64) -> f64 {
    if sales_tax > 1.0 {
        sales_tax / 100.0
    } else {
        sales_tax
    }
}

/// floor(subtotal × rate), `None` on overflow
pub fn tax_cents(subtotal_cents: i64, rate: f64) -> Option<i64> {
    let rate = Decimal::from_f64(rate).unwrap_or_default();
    Decimal::from(subtotal_cents)
        .checked_mul(rate)?
        .floor()
        .to_i64()
}

fn out_of_range() -> AppError {
    AppError::with_message(ErrorCode::OrderItemInvalid, "Order total is out of range")
}

/// Price every item and compute order totals
///
/// 任一金额溢出 i64 时返回 `OrderItemInvalid` (400)。
pub fn calculate_order(
    items: &[OrderItemInput],
    tax_rate: f64,
    discount: Option<&Discount>,
) -> AppResult<OrderTotals> {
    let items = items.iter().map(price_item).collect::<AppResult<Vec<OrderItem>>>()?;
    let subtotal_cents = items
        .iter()
        .try_fold(0i64, |acc, item| acc.checked_add(item.line_total_cents()))
        .ok_or_else(out_of_range)?;
    let tax_cents = tax_cents(subtotal_cents, tax_rate).ok_or_else(out_of_range)?;
    let discount_cents = discount.map(|d| d.amount_cents).unwrap_or(0);
    let total_cents = subtotal_cents
        .checked_add(tax_cents)
        .and_then(|t| t.checked_sub(discount_cents))
        .ok_or_else(out_of_range)?;

    Ok(OrderTotals {
        items,
        subtotal_cents,
        tax_cents,
        discount_cents,
        total_cents,
    })
}
