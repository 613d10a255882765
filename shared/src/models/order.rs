//! Order Model
//!
//! 订单生命周期:
//! `order_created → order_accepted → ready_for_pickup → order_delivered`，
//! `order_cancelled` 可以从任意非终态进入。
//!
//! 金额全部是整数分 (cents)。订单项的价格在预览/下单时计算一次并冻结，
//! 之后菜单改价不会影响已有订单。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::serde_helpers::null_default;

// =============================================================================
// Status
// =============================================================================

/// Order status as stored and exchanged with the ordering app
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    OrderCreated,
    OrderAccepted,
    ReadyForPickup,
    OrderDelivered,
    OrderCancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::OrderCreated => "order_created",
            OrderStatus::OrderAccepted => "order_accepted",
            OrderStatus::ReadyForPickup => "ready_for_pickup",
            OrderStatus::OrderDelivered => "order_delivered",
            OrderStatus::OrderCancelled => "order_cancelled",
        }
    }

    /// Parse the PascalCase names used by the staff dashboard
    pub fn from_dashboard_name(name: &str) -> Option<Self> {
        match name {
            "OrderCreated" => Some(OrderStatus::OrderCreated),
            "OrderAccepted" => Some(OrderStatus::OrderAccepted),
            "ReadyForPickup" => Some(OrderStatus::ReadyForPickup),
            "OrderCompleted" => Some(OrderStatus::OrderDelivered),
            "OrderCancelled" => Some(OrderStatus::OrderCancelled),
            _ => None,
        }
    }

    /// Real-time event published when an order enters this status
    ///
    /// `order_created` 和 `order_cancelled` 不推送。
    pub fn event_name(&self) -> Option<&'static str> {
        match self {
            OrderStatus::OrderAccepted => Some("order_accepted"),
            OrderStatus::ReadyForPickup => Some("order_ready_for_pickup"),
            OrderStatus::OrderDelivered => Some("order_completed"),
            OrderStatus::OrderCreated | OrderStatus::OrderCancelled => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Snapshots & line item inputs
// =============================================================================

/// Origin snapshot (where the customer ordered from)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginInput {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
}

/// Customer snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInput {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemModifierOption {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub price_cents: i64,
}

/// Selected modifier group with the options the customer picked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemModifier {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    #[validate(nested)]
    pub options: Vec<OrderItemModifierOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    /// Options included in the base price
    #[serde(default)]
    #[validate(range(min = 0))]
    pub free_choices: i64,
    /// Charge per option beyond `free_choices`
    #[serde(default)]
    #[validate(range(min = 0))]
    pub extra_choice_price_cents: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemVariant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub price_cents: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Line item as submitted by the ordering app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    /// Base price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub modifiers: Vec<OrderItemModifier>,
    #[serde(default)]
    #[validate(nested)]
    pub variants: Vec<OrderItemVariant>,
    #[serde(default)]
    pub station_tags: Vec<String>,
}

/// Discount applied to an order
///
/// 只有 `amountCents` 参与计算，其余字段 (name, type ...) 原样保存。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    #[serde(default)]
    pub amount_cents: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Requests
// =============================================================================

/// Direct order creation (`POST /orders`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1))]
    pub restaurant_id: String,
    #[validate(length(min = 1))]
    pub location_id: String,
    #[serde(default)]
    pub location_slug: String,
    #[serde(default)]
    pub origin: OriginInput,
    #[serde(default)]
    pub customer: CustomerInput,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub get_sms: bool,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub transaction_details: Option<Value>,
    #[serde(default)]
    pub discount: Option<Discount>,
}

/// Pricing preview (`POST /cart/preview-order`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOrderRequest {
    #[validate(length(min = 1))]
    pub restaurant_id: String,
    #[validate(length(min = 1))]
    pub location_id: String,
    #[serde(default)]
    pub location_slug: Option<String>,
    /// 可选，预览时菜单可能未知
    #[serde(default)]
    pub menu_id: Option<String>,
    #[serde(default)]
    pub origin: Option<OriginInput>,
    #[serde(default)]
    pub customer: Option<CustomerInput>,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub get_sms: Option<bool>,
    #[serde(default)]
    pub discount: Option<Discount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1))]
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub estimated_minutes: Option<i64>,
}

/// Query string of the location order list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

// =============================================================================
// Stored documents
// =============================================================================

/// Priced line item frozen into a preview or an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub menu_item_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    /// quantity × (price + variants + modifier overage)
    #[serde(default)]
    pub subtotal_cents: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub modifiers: Vec<OrderItemModifier>,
    #[serde(default, deserialize_with = "null_default")]
    pub variants: Vec<OrderItemVariant>,
    #[serde(default, deserialize_with = "null_default")]
    pub station_tags: Vec<String>,
    #[serde(default)]
    pub started_at: Option<i64>,
    #[serde(default)]
    pub completed_at: Option<i64>,
}

impl OrderItem {
    /// Line total, falling back to `price × quantity` for items stored
    /// without a computed subtotal
    pub fn line_total_cents(&self) -> i64 {
        self.subtotal_cents
            .unwrap_or_else(|| self.price.saturating_mul(self.quantity))
    }
}

/// Preview document (table `orders_preview`), consumed once
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub preview_order_id: String,
    pub restaurant_id: String,
    pub location_id: String,
    #[serde(default)]
    pub location_slug: Option<String>,
    #[serde(default)]
    pub menu_id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub subtotal_cents: i64,
    #[serde(default)]
    pub tax_cents: i64,
    #[serde(default)]
    pub discount_cents: i64,
    #[serde(default)]
    pub total_price_cents: i64,
    #[serde(default)]
    pub customer: Option<CustomerInput>,
    #[serde(default)]
    pub origin: Option<OriginInput>,
    #[serde(default)]
    pub get_sms: bool,
    #[serde(default)]
    pub discount: Option<Discount>,
    #[serde(default)]
    pub created_at: i64,
}

/// Order document (table `orders`), `_id` equals `orderId`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_id: String,
    pub restaurant_id: String,
    pub location_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub location_slug: String,
    #[serde(default, deserialize_with = "null_default")]
    pub origin: OriginInput,
    #[serde(default, deserialize_with = "null_default")]
    pub customer: CustomerInput,
    #[serde(default, deserialize_with = "null_default")]
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(default)]
    pub subtotal_cents: i64,
    #[serde(default)]
    pub tax_cents: i64,
    #[serde(default)]
    pub total_cents: i64,
    #[serde(default)]
    pub discount: Option<Discount>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub transaction_details: Option<Value>,
    #[serde(default)]
    pub get_sms: bool,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub estimated_ready_at: Option<i64>,
    #[serde(default)]
    pub ready_at: Option<i64>,
    #[serde(default)]
    pub picked_up_at: Option<i64>,
}

impl Order {
    /// Time the order was handed over, `updatedAt` for legacy documents
    pub fn completed_at(&self) -> i64 {
        self.picked_up_at.unwrap_or(self.updated_at)
    }

    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOrderResponse {
    pub preview_order_id: String,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_price_cents: i64,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,
    pub created_at: i64,
    pub estimated_ready_at: Option<i64>,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusResponse {
    pub order_id: String,
    pub status: OrderStatus,
    pub updated_at: i64,
    pub estimated_ready_at: Option<i64>,
}

impl From<&Order> for OrderStatusResponse {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id.clone(),
            status: order.status,
            updated_at: order.updated_at,
            estimated_ready_at: order.estimated_ready_at,
        }
    }
}

// =============================================================================
// Staff dashboard format
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMeta {
    pub correlation_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOrderItem {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    pub price_cents: i64,
    pub notes: Option<String>,
    pub modifiers: Vec<OrderItemModifier>,
    pub variants: Vec<OrderItemVariant>,
    pub station_tags: Vec<String>,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
}

/// Order as rendered to the staff dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_code: String,
    pub payment_id: String,
    pub restaurant: String,
    pub meta: OrderMeta,
    pub customer: CustomerInput,
    pub origin: OriginInput,
    pub items: Vec<DashboardOrderItem>,
    pub started_at: i64,
    pub total_price_cents: i64,
    pub get_sms: bool,
    pub status: OrderStatus,
    pub ended_at: Option<i64>,
}

/// Dashboard status change (`POST /restaurant/order-status/`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatusUpdate {
    #[validate(length(min = 1))]
    pub order_id: String,
    pub order_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatusResponse {
    pub order_id: String,
    pub status: String,
}

// =============================================================================
// Real-time event
// =============================================================================

/// Payload pushed to the order room and the restaurant room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    pub order_id: String,
    pub restaurant_id: String,
    pub status: OrderStatus,
    pub timestamp: i64,
}
