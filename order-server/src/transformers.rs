//! Response shape transformers
//!
//! 存储文档字段可能缺失或格式不一 (字符串 / 多语言 map)，
//! 这里把它们转换为客户端约定的严格结构并填充默认值。
//! 全部是纯函数。

use shared::models::{
    CategoryResponse, DashboardOrder, DashboardOrderItem, LocalizedText, Location,
    LocationDetails, LocationListing, MenuDocument, MenuItemResponse, MenuResponse, MenuSummary,
    ModifierOptionResponse, ModifierResponse, Multilingual, Order, OrderItem, OrderMeta, Origin,
    OriginDetails, Restaurant, RestaurantSummary, StoredCategory, StoredMenuItem, StoredModifier,
    StoredModifierOption, StoredVariant, VariantResponse,
};

// =============================================================================
// Multilingual
// =============================================================================

/// Stored text → `{en, es, pt}`
///
/// 纯字符串视为英文；map 只取 en/es/pt，null 视为空串；其他类型全部为空。
pub fn to_multilingual(value: Option<&LocalizedText>) -> Multilingual {
    match value {
        Some(LocalizedText::Text(text)) => Multilingual::en(text.clone()),
        Some(LocalizedText::Map(map)) => {
            let pick = |key: &str| map.get(key).cloned().flatten().unwrap_or_default();
            Multilingual {
                en: pick("en"),
                es: pick("es"),
                pt: pick("pt"),
            }
        }
        Some(LocalizedText::Other(_)) | None => Multilingual::default(),
    }
}

fn is_present(value: Option<&LocalizedText>) -> bool {
    match value {
        Some(LocalizedText::Text(text)) => !text.is_empty(),
        Some(LocalizedText::Map(map)) => !map.is_empty(),
        Some(LocalizedText::Other(v)) => !v.is_null(),
        None => false,
    }
}

// =============================================================================
// Menu
// =============================================================================

pub fn transform_modifier_option(option: &StoredModifierOption) -> ModifierOptionResponse {
    ModifierOptionResponse {
        id: option.id.clone(),
        name: to_multilingual(option.name.as_ref()),
        price_cents: option.price_cents.unwrap_or(0),
    }
}

pub fn transform_modifier(modifier: &StoredModifier) -> ModifierResponse {
    ModifierResponse {
        id: modifier.id.clone(),
        name: to_multilingual(modifier.name.as_ref()),
        kind: modifier.kind.clone().unwrap_or_else(|| "standard".into()),
        required: modifier.required.unwrap_or(false),
        selection_mode: modifier
            .selection_mode
            .clone()
            .unwrap_or_else(|| "single".into()),
        max_choices: modifier.max_choices.unwrap_or(1),
        free_choices: modifier.free_choices.unwrap_or(1),
        extra_choice_price_cents: modifier.extra_choice_price_cents.unwrap_or(0),
        options: modifier.options.iter().map(transform_modifier_option).collect(),
    }
}

/// Variant names stay plain strings
pub fn transform_variant(variant: &StoredVariant) -> VariantResponse {
    VariantResponse {
        id: variant.id.clone(),
        name: variant.name.clone(),
        price_cents: variant.price_cents.unwrap_or(0),
        default: variant.default.unwrap_or(false),
    }
}

pub fn transform_menu_item(item: &StoredMenuItem) -> MenuItemResponse {
    MenuItemResponse {
        id: item.id.clone(),
        name: to_multilingual(item.name.as_ref()),
        description: to_multilingual(item.description.as_ref()),
        image_urls: item.image_urls.clone().unwrap_or_default(),
        category_id: item.category_id.clone(),
        price_cents: item.price_cents.unwrap_or(0),
        making_cost_cents: item.making_cost_cents.unwrap_or(0),
        is_available: item.is_available.unwrap_or(true),
        station_tags: item.station_tags.clone(),
        variants: item.variants.iter().map(transform_variant).collect(),
        modifiers: item.modifiers.iter().map(transform_modifier).collect(),
    }
}

pub fn transform_category(category: &StoredCategory) -> CategoryResponse {
    CategoryResponse {
        id: category.id.clone(),
        name: to_multilingual(category.name.as_ref()),
        description: to_multilingual(category.description.as_ref()),
        sort_order: category.sort_order.unwrap_or(0),
        emoji: category.emoji.clone(),
    }
}

pub fn transform_menu(menu: &MenuDocument) -> MenuResponse {
    MenuResponse {
        id: menu.id.clone(),
        restaurant_id: menu.restaurant_id.clone(),
        location_id: menu.location_id.clone(),
        menu_slug: menu.menu_slug.clone(),
        name: to_multilingual(menu.name.as_ref()),
        categories: menu.categories.iter().map(transform_category).collect(),
        items: menu.items.iter().map(transform_menu_item).collect(),
        sales_tax: menu.sales_tax.unwrap_or(0.0),
    }
}

pub fn transform_menu_summary(menu: &MenuDocument) -> MenuSummary {
    MenuSummary {
        id: menu.id.clone(),
        menu_slug: menu.menu_slug.clone(),
        name: to_multilingual(menu.name.as_ref()),
        description: is_present(menu.description.as_ref())
            .then(|| to_multilingual(menu.description.as_ref())),
        available: menu.available.unwrap_or(true),
    }
}

// =============================================================================
// Restaurant / Location / Origin
// =============================================================================

/// `logo` 缺失时使用 `logoUrl`
pub fn transform_restaurant(restaurant: &Restaurant) -> RestaurantSummary {
    let logo = restaurant
        .logo
        .clone()
        .filter(|l| !l.is_empty())
        .or_else(|| restaurant.logo_url.clone())
        .unwrap_or_default();
    RestaurantSummary {
        id: restaurant.id.clone(),
        name: restaurant.name.clone(),
        concept: restaurant.concept.clone(),
        logo,
    }
}

/// 有任意一天营业即为营业；没有配置营业时间视为营业
pub fn location_is_open(location: &Location) -> bool {
    if location.working_hours.is_empty() {
        return true;
    }
    location
        .working_hours
        .iter()
        .any(|day| day.get("isOpen").and_then(|v| v.as_bool()).unwrap_or(false))
}

/// Location details for the ordering app
pub fn transform_location(location: &Location) -> LocationDetails {
    let payment = location.payment.clone().unwrap_or_default();
    LocationDetails {
        id: location.id.clone(),
        location_slug: location
            .location_slug
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| location.id.clone()),
        name: location.name.clone(),
        is_active: location.is_active.unwrap_or(true),
        accept_payment: payment.accept_payment,
        emergepay_wallets_public_id: payment.emergepay_wallets_public_id,
        is_open: location_is_open(location),
    }
}

/// Location as listed in the management app
pub fn transform_location_listing(location: &Location) -> LocationListing {
    LocationListing {
        id: location.id.clone(),
        restaurant_id: location.restaurant_id.clone(),
        name: location.name.clone(),
        address: location.address.clone(),
        location_slug: location.location_slug.clone().unwrap_or_default(),
        is_mobile: location.is_mobile.unwrap_or(false),
        is_active: location.is_active.unwrap_or(true),
        is_open: location.is_open.unwrap_or(true),
        alert_numbers: location.alert_numbers.clone(),
        contact: if location.contact.is_null() {
            serde_json::json!({})
        } else {
            location.contact.clone()
        },
        working_hours: location.working_hours.clone(),
        timezone: location.timezone.clone().unwrap_or_default(),
    }
}

pub fn transform_origin(origin: &Origin) -> OriginDetails {
    OriginDetails {
        id: origin.id.clone(),
        label: origin
            .label
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| origin.id.clone()),
        restaurant_id: origin.restaurant_id.clone(),
        location_id: origin.location_id.clone(),
        kind: origin.kind.clone().unwrap_or_default(),
    }
}

// =============================================================================
// Staff dashboard
// =============================================================================

fn transform_dashboard_item(item: &OrderItem) -> DashboardOrderItem {
    DashboardOrderItem {
        id: item.id.clone(),
        menu_item_id: item.menu_item_id.clone(),
        name: item.name.clone(),
        price_cents: item.price,
        notes: item.notes.clone(),
        modifiers: item.modifiers.clone(),
        variants: item.variants.clone(),
        station_tags: item.station_tags.clone(),
        started_at: item.started_at,
        completed_at: item.completed_at,
    }
}

/// Order in the staff dashboard format
///
/// 每次渲染生成新的 `correlationId`。
pub fn transform_dashboard_order(order: &Order) -> DashboardOrder {
    DashboardOrder {
        id: order.id.clone(),
        order_code: order.order_id.clone(),
        payment_id: order.payment_id.clone().unwrap_or_default(),
        restaurant: order.restaurant_id.clone(),
        meta: OrderMeta {
            correlation_id: uuid::Uuid::new_v4().to_string(),
        },
        customer: order.customer.clone(),
        origin: order.origin.clone(),
        items: order.items.iter().map(transform_dashboard_item).collect(),
        started_at: order.created_at,
        total_price_cents: order.total_cents,
        get_sms: false,
        status: order.status,
        ended_at: order.picked_up_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::OrderStatus;

    fn text(value: serde_json::Value) -> LocalizedText {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_to_multilingual_shapes() {
        assert_eq!(
            to_multilingual(Some(&text(json!("Coffee")))),
            Multilingual::en("Coffee")
        );
        assert_eq!(
            to_multilingual(Some(&text(json!({"en": "Coffee", "es": "Café", "fr": "Café"})))),
            Multilingual {
                en: "Coffee".into(),
                es: "Café".into(),
                pt: String::new()
            }
        );
        assert_eq!(
            to_multilingual(Some(&text(json!({"en": null})))),
            Multilingual::default()
        );
        assert_eq!(to_multilingual(Some(&text(json!(12)))), Multilingual::default());
        assert_eq!(to_multilingual(None), Multilingual::default());
    }

    #[test]
    fn test_modifier_defaults() {
        let modifier: StoredModifier =
            serde_json::from_value(json!({"id": "sauce", "options": [{"id": "bbq"}]})).unwrap();
        let out = transform_modifier(&modifier);
        assert_eq!(out.kind, "standard");
        assert_eq!(out.selection_mode, "single");
        assert_eq!(out.max_choices, 1);
        assert_eq!(out.free_choices, 1);
        assert_eq!(out.extra_choice_price_cents, 0);
        assert!(!out.required);
        assert_eq!(out.options[0].price_cents, 0);
    }

    #[test]
    fn test_menu_transform_fills_defaults() {
        let menu: MenuDocument = serde_json::from_value(json!({
            "_id": "m1",
            "restaurantId": "r1",
            "locationId": "l1",
            "menuSlug": "lunch",
            "name": "Lunch",
            "categories": [{"id": "c1", "name": {"en": "Mains"}}],
            "items": [{
                "id": "i1",
                "name": "Burger",
                "categoryId": "c1",
                "priceCents": 899,
                "variants": [{"id": "v1", "name": "Double", "priceCents": 300}]
            }]
        }))
        .unwrap();

        let out = transform_menu(&menu);
        assert_eq!(out.name, Multilingual::en("Lunch"));
        assert_eq!(out.sales_tax, 0.0);
        assert_eq!(out.categories[0].sort_order, 0);
        assert_eq!(out.categories[0].description, Multilingual::default());

        let item = &out.items[0];
        assert!(item.is_available);
        assert!(item.image_urls.is_empty());
        assert_eq!(item.making_cost_cents, 0);
        assert_eq!(item.variants[0].name, "Double");
        assert!(!item.variants[0].default);

        let json = serde_json::to_value(&out).unwrap();
        assert!(json["categories"][0].get("emoji").is_none());
    }

    #[test]
    fn test_menu_summary_description_only_when_present() {
        let mut menu = MenuDocument {
            id: "m1".into(),
            ..Default::default()
        };
        let summary = transform_menu_summary(&menu);
        assert!(summary.description.is_none());
        assert!(summary.available);
        assert!(serde_json::to_value(&summary).unwrap().get("description").is_none());

        menu.description = Some(text(json!("All day")));
        menu.available = Some(false);
        let summary = transform_menu_summary(&menu);
        assert_eq!(summary.description, Some(Multilingual::en("All day")));
        assert!(!summary.available);
    }

    #[test]
    fn test_restaurant_logo_fallback() {
        let restaurant = Restaurant {
            id: "r1".into(),
            logo_url: Some("https://cdn/logo.png".into()),
            ..Default::default()
        };
        assert_eq!(transform_restaurant(&restaurant).logo, "https://cdn/logo.png");
    }

    #[test]
    fn test_location_is_open() {
        let mut location = Location::default();
        assert!(location_is_open(&location));

        location.working_hours = vec![json!({"day": "mon", "isOpen": false})];
        assert!(!location_is_open(&location));

        location.working_hours.push(json!({"day": "tue", "isOpen": true}));
        assert!(location_is_open(&location));
    }

    #[test]
    fn test_location_details_defaults() {
        let location: Location = serde_json::from_value(json!({
            "_id": "l1",
            "name": "Downtown",
            "payment": {"acceptPayment": true, "emergepayWalletsPublicId": "pub-1"}
        }))
        .unwrap();
        let out = transform_location(&location);
        assert_eq!(out.location_slug, "l1");
        assert!(out.is_active);
        assert!(out.accept_payment);
        assert_eq!(out.emergepay_wallets_public_id.as_deref(), Some("pub-1"));

        let listing = transform_location_listing(&location);
        assert_eq!(listing.location_slug, "");
        assert_eq!(listing.contact, json!({}));
        assert!(!listing.is_mobile);
    }

    #[test]
    fn test_origin_label_defaults_to_id() {
        let origin = Origin {
            id: "table-7".into(),
            kind: Some("table".into()),
            ..Default::default()
        };
        let out = transform_origin(&origin);
        assert_eq!(out.label, "table-7");
        assert_eq!(out.kind, "table");
    }

    #[test]
    fn test_dashboard_order_format() {
        let order = Order {
            id: "ORD-1".into(),
            order_id: "ORD-1".into(),
            restaurant_id: "r1".into(),
            status: OrderStatus::OrderDelivered,
            total_cents: 538,
            created_at: 1000,
            picked_up_at: Some(2000),
            items: vec![OrderItem {
                id: "1".into(),
                price: 499,
                ..Default::default()
            }],
            ..Default::default()
        };
        let out = transform_dashboard_order(&order);
        assert_eq!(out.order_code, "ORD-1");
        assert_eq!(out.restaurant, "r1");
        assert_eq!(out.payment_id, "");
        assert_eq!(out.items[0].price_cents, 499);
        assert_eq!(out.started_at, 1000);
        assert_eq!(out.ended_at, Some(2000));
        assert_eq!(out.total_price_cents, 538);
        assert!(!out.get_sms);

        let again = transform_dashboard_order(&order);
        assert_ne!(out.meta.correlation_id, again.meta.correlation_id);
    }
}
