//! Item Price Calculator
//!
//! 单个订单项的小计:
//!
//! ```text
//! quantity × (price + Σ variant.priceCents + Σ modifier overage)
//! overage = max(0, selected_options - freeChoices) × extraChoicePriceCents
//! ```

use shared::models::{OrderItem, OrderItemInput, OrderItemModifier};

use crate::utils::{AppError, AppResult, ErrorCode};

/// Chargeable overage of one modifier group, per item unit
///
/// 溢出时返回 `None`。
pub fn modifier_overage_cents(modifier: &OrderItemModifier) -> Option<i64> {
    let selected = i64::try_from(modifier.options.len()).ok()?;
    let extra = selected.checked_sub(modifier.free_choices)?.max(0);
    extra.checked_mul(modifier.extra_choice_price_cents)
}

/// Unit price: base + variants + modifier overage
pub fn unit_price_cents(item: &OrderItemInput) -> Option<i64> {
    let variants = item
        .variants
        .iter()
        .try_fold(0i64, |acc, v| acc.checked_add(v.price_cents))?;
    let modifiers = item
        .modifiers
        .iter()
        .try_fold(0i64, |acc, m| acc.checked_add(modifier_overage_cents(m)?))?;
    item.price.checked_add(variants)?.checked_add(modifiers)
}

/// Line subtotal (unit price × quantity)
pub fn item_subtotal_cents(item: &OrderItemInput) -> Option<i64> {
    unit_price_cents(item)?.checked_mul(item.quantity)
}

/// Freeze a submitted line item into its priced snapshot
pub fn price_item(item: &OrderItemInput) -> AppResult<OrderItem> {
    let subtotal_cents = item_subtotal_cents(item).ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderItemInvalid, "Item price is out of range")
            .with_detail("itemId", item.id.clone())
    })?;

    Ok(OrderItem {
        id: item.id.clone(),
        menu_item_id: item.menu_item_id.clone(),
        name: item.name.clone(),
        price: item.price,
        quantity: item.quantity,
        subtotal_cents: Some(subtotal_cents),
        notes: item.notes.clone(),
        modifiers: item.modifiers.clone(),
        variants: item.variants.clone(),
        station_tags: item.station_tags.clone(),
        started_at: None,
        completed_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderItemModifierOption, OrderItemVariant};

    fn item(price: i64, quantity: i64) -> OrderItemInput {
        OrderItemInput {
            id: "1".into(),
            menu_item_id: "burger".into(),
            name: "Burger".into(),
            price,
            quantity,
            notes: None,
            modifiers: vec![],
            variants: vec![],
            station_tags: vec!["grill".into()],
        }
    }

    fn modifier(options: usize, free_choices: i64, extra: i64) -> OrderItemModifier {
        OrderItemModifier {
            id: "toppings".into(),
            name: "Toppings".into(),
            options: (0..options)
                .map(|i| OrderItemModifierOption {
                    id: format!("opt-{i}"),
                    name: format!("Option {i}"),
                    price_cents: 0,
                })
                .collect(),
            price_cents: None,
            free_choices,
            extra_choice_price_cents: extra,
        }
    }

    #[test]
    fn test_plain_item_is_price_times_quantity() {
        assert_eq!(item_subtotal_cents(&item(499, 1)), Some(499));
        assert_eq!(item_subtotal_cents(&item(250, 4)), Some(1000));
    }

    #[test]
    fn test_modifier_overage() {
        // 3 选 1 免费，每多一个 150
        assert_eq!(modifier_overage_cents(&modifier(3, 1, 150)), Some(300));
        assert_eq!(modifier_overage_cents(&modifier(1, 1, 150)), Some(0));
        assert_eq!(modifier_overage_cents(&modifier(0, 2, 150)), Some(0));
    }

    #[test]
    fn test_overage_applies_per_unit() {
        let mut burger = item(500, 2);
        burger.modifiers.push(modifier(3, 1, 150));
        // 2 × (500 + 300)
        assert_eq!(item_subtotal_cents(&burger), Some(1600));
    }

    #[test]
    fn test_variants_add_to_unit_price() {
        let mut coffee = item(300, 3);
        coffee.variants.push(OrderItemVariant {
            id: "large".into(),
            name: "Large".into(),
            price_cents: 75,
        });
        assert_eq!(unit_price_cents(&coffee), Some(375));
        assert_eq!(item_subtotal_cents(&coffee), Some(1125));
    }

    #[test]
    fn test_price_item_snapshot() {
        let priced = price_item(&item(499, 2)).unwrap();
        assert_eq!(priced.subtotal_cents, Some(998));
        assert_eq!(priced.line_total_cents(), 998);
        assert_eq!(priced.station_tags, vec!["grill".to_string()]);
        assert!(priced.started_at.is_none());
    }

    #[test]
    fn test_overflow_is_rejected() {
        // 2^62 × 4 超出 i64
        let huge = item(4_611_686_018_427_387_904, 4);
        assert_eq!(item_subtotal_cents(&huge), None);
        let err = price_item(&huge).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderItemInvalid);

        let mut stacked = item(i64::MAX, 1);
        stacked.variants.push(OrderItemVariant {
            id: "large".into(),
            name: "Large".into(),
            price_cents: 1,
        });
        assert_eq!(unit_price_cents(&stacked), None);

        assert_eq!(modifier_overage_cents(&modifier(3, 1, i64::MAX)), None);
    }
}
