//! Order Service - 价格预览、下单、状态流转和推送
//!
//! # 状态流转
//!
//! | 目标状态 | 写入字段 | 推送事件 |
//! |----------|----------|----------|
//! | order_accepted | estimatedReadyAt (给了分钟数时) | order_accepted |
//! | ready_for_pickup | readyAt | order_ready_for_pickup |
//! | order_delivered | pickedUpAt | order_completed |
//! | order_cancelled | - | - |
//!
//! 状态之间没有迁移限制。推送失败不影响状态更新。

use std::sync::Arc;

use serde_json::{Map, Value, json};
use shared::models::{
    CreateOrderRequest, Order, OrderConfirmation, OrderEvent, OrderStatus, OrderStatusResponse,
    PreviewOrder, PreviewOrderRequest, PreviewOrderResponse,
};
use shared::util::{now_millis, prefixed_hex_id};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{
    LocationRepository, MenuRepository, OrderRepository, PreviewRepository,
};
use crate::pricing::{calculate_order, normalize_tax_rate};
use crate::services::notifier::OrderNotifier;
use crate::utils::time::{resolve_timezone, today_range_millis};
use crate::utils::{AppError, AppResult, ErrorCode};

/// How a claimed preview was paid
#[derive(Debug, Clone)]
pub struct PaymentStamp {
    pub payment_id: Option<String>,
    pub transaction_details: Value,
}

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    previews: PreviewRepository,
    menus: MenuRepository,
    locations: LocationRepository,
    notifier: Arc<dyn OrderNotifier>,
    default_tax_rate: f64,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, notifier: Arc<dyn OrderNotifier>, default_tax_rate: f64) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            previews: PreviewRepository::new(db.clone()),
            menus: MenuRepository::new(db.clone()),
            locations: LocationRepository::new(db),
            notifier,
            default_tax_rate,
        }
    }

    /// 菜单存在且配置了税率时使用菜单税率，否则使用默认税率
    async fn tax_rate_for(&self, menu_id: Option<&str>) -> AppResult<f64> {
        let Some(menu_id) = menu_id.filter(|id| !id.is_empty()) else {
            return Ok(self.default_tax_rate);
        };
        let rate = self
            .menus
            .find_by_id(menu_id)
            .await?
            .and_then(|menu| menu.sales_tax)
            .map(normalize_tax_rate)
            .unwrap_or(self.default_tax_rate);
        Ok(rate)
    }

    // ========== Preview ==========

    /// Price a cart and store it as a preview
    pub async fn preview_order(
        &self,
        request: PreviewOrderRequest,
    ) -> AppResult<PreviewOrderResponse> {
        let tax_rate = self.tax_rate_for(request.menu_id.as_deref()).await?;
        let totals = calculate_order(&request.items, tax_rate, request.discount.as_ref())?;
        let preview_id = prefixed_hex_id("PREV", 8);

        let preview = PreviewOrder {
            id: preview_id.clone(),
            preview_order_id: preview_id,
            restaurant_id: request.restaurant_id,
            location_id: request.location_id,
            location_slug: request.location_slug,
            menu_id: request.menu_id,
            items: totals.items,
            subtotal_cents: totals.subtotal_cents,
            tax_cents: totals.tax_cents,
            discount_cents: totals.discount_cents,
            total_price_cents: totals.total_cents,
            customer: request.customer,
            origin: request.origin,
            get_sms: request.get_sms.unwrap_or(false),
            discount: request.discount,
            created_at: now_millis(),
        };
        let preview = self.previews.create(preview).await?;
        tracing::info!(
            preview_id = %preview.id,
            subtotal = preview.subtotal_cents,
            tax = preview.tax_cents,
            total = preview.total_price_cents,
            "Preview order created"
        );

        Ok(PreviewOrderResponse {
            preview_order_id: preview.preview_order_id,
            subtotal_cents: preview.subtotal_cents,
            tax_cents: preview.tax_cents,
            total_price_cents: preview.total_price_cents,
            items: preview.items,
        })
    }

    /// Atomically consume a preview and turn it into an order
    pub async fn place_from_preview(
        &self,
        preview_id: &str,
        payment: PaymentStamp,
    ) -> AppResult<Order> {
        let preview = self.claim_preview(preview_id).await?;
        self.order_from_preview(preview, payment).await
    }

    /// 原子领取预览单，不存在 (或已被领取) 时返回 404
    pub async fn claim_preview(&self, preview_id: &str) -> AppResult<PreviewOrder> {
        self.previews.claim(preview_id).await?.ok_or_else(|| {
            AppError::new(ErrorCode::PreviewOrderNotFound).with_detail("previewOrderId", preview_id)
        })
    }

    /// Create the order for an already claimed preview
    pub async fn order_from_preview(
        &self,
        preview: PreviewOrder,
        payment: PaymentStamp,
    ) -> AppResult<Order> {
        let now = now_millis();
        let order_id = prefixed_hex_id("ORD", 8);
        let order = Order {
            id: order_id.clone(),
            order_id,
            restaurant_id: preview.restaurant_id,
            location_id: preview.location_id,
            location_slug: preview.location_slug.unwrap_or_default(),
            origin: preview.origin.unwrap_or_default(),
            customer: preview.customer.unwrap_or_default(),
            items: preview.items,
            status: OrderStatus::OrderCreated,
            subtotal_cents: preview.subtotal_cents,
            tax_cents: preview.tax_cents,
            total_cents: preview.total_price_cents,
            discount: preview.discount,
            payment_id: payment.payment_id,
            transaction_details: Some(payment.transaction_details),
            get_sms: preview.get_sms,
            created_at: now,
            updated_at: now,
            estimated_ready_at: None,
            ready_at: None,
            picked_up_at: None,
        };
        let order = self.orders.create(order).await?;
        tracing::info!(
            order_id = %order.id,
            preview_id = %preview.id,
            total = order.total_cents,
            "Order placed from preview"
        );
        Ok(order)
    }

    // ========== Direct order ==========

    /// Create an order directly (default tax rate)
    pub async fn create_order(&self, request: CreateOrderRequest) -> AppResult<OrderConfirmation> {
        let totals = calculate_order(
            &request.items,
            self.default_tax_rate,
            request.discount.as_ref(),
        )?;
        let now = now_millis();
        let order_id = prefixed_hex_id("ORD", 8);

        let order = Order {
            id: order_id.clone(),
            order_id,
            restaurant_id: request.restaurant_id,
            location_id: request.location_id,
            location_slug: request.location_slug,
            origin: request.origin,
            customer: request.customer,
            items: totals.items,
            status: OrderStatus::OrderCreated,
            subtotal_cents: totals.subtotal_cents,
            tax_cents: totals.tax_cents,
            total_cents: totals.total_cents,
            discount: request.discount,
            payment_id: request.payment_id,
            transaction_details: request.transaction_details,
            get_sms: request.get_sms,
            created_at: now,
            updated_at: now,
            estimated_ready_at: None,
            ready_at: None,
            picked_up_at: None,
        };
        let order = self.orders.create(order).await?;
        tracing::info!(order_id = %order.id, total = order.total_cents, "Order created");

        Ok(OrderConfirmation {
            order_id: order.order_id,
            created_at: order.created_at,
            estimated_ready_at: order.estimated_ready_at,
            status: order.status,
        })
    }

    // ========== Queries ==========

    pub async fn get_order(&self, order_id: &str) -> AppResult<Order> {
        self.orders.find_by_id(order_id).await?.ok_or_else(|| {
            AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", order_id)
        })
    }

    pub async fn get_order_status(&self, order_id: &str) -> AppResult<OrderStatusResponse> {
        let order = self.get_order(order_id).await?;
        Ok(OrderStatusResponse::from(&order))
    }

    pub async fn list_orders(
        &self,
        restaurant_id: &str,
        location_id: &str,
        status: Option<OrderStatus>,
    ) -> AppResult<Vec<Order>> {
        Ok(self
            .orders
            .find_by_location(restaurant_id, location_id, status)
            .await?)
    }

    /// Orders created today in the location's timezone, newest first
    pub async fn today_orders(
        &self,
        restaurant_id: &str,
        location_id: &str,
    ) -> AppResult<Vec<Order>> {
        let timezone = self
            .locations
            .find(restaurant_id, location_id)
            .await?
            .and_then(|l| l.timezone);
        let tz = resolve_timezone(timezone.as_deref());
        let (start, end) = today_range_millis(tz);
        Ok(self
            .orders
            .find_created_between(restaurant_id, location_id, start, end)
            .await?)
    }

    // ========== Status ==========

    /// Move an order to `status`, stamp the matching timestamp and notify
    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        estimated_minutes: Option<i64>,
    ) -> AppResult<Order> {
        let now = now_millis();
        let patch = status_patch(status, now, estimated_minutes)?;

        let order = self.orders.merge(order_id, patch).await?.ok_or_else(|| {
            AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", order_id)
        })?;
        tracing::info!(order_id = %order_id, status = %status, "Order status updated");

        if let Some(event_name) = status.event_name() {
            let event = OrderEvent {
                order_id: order.order_id.clone(),
                restaurant_id: order.restaurant_id.clone(),
                status,
                timestamp: now,
            };
            self.notifier.order_status_changed(event_name, &event).await;
        }

        Ok(order)
    }
}

/// Fields written by a status transition
///
/// `estimatedMinutes` 过大导致时间戳溢出时返回 `ValueOutOfRange`。
pub fn status_patch(
    status: OrderStatus,
    now: i64,
    estimated_minutes: Option<i64>,
) -> AppResult<Map<String, Value>> {
    let mut patch = Map::new();
    patch.insert("status".into(), json!(status));
    patch.insert("updatedAt".into(), json!(now));

    match status {
        OrderStatus::OrderAccepted => {
            if let Some(minutes) = estimated_minutes {
                let ready_at = minutes
                    .checked_mul(60_000)
                    .and_then(|offset| now.checked_add(offset))
                    .ok_or_else(|| {
                        AppError::new(ErrorCode::ValueOutOfRange)
                            .with_detail("estimatedMinutes", minutes)
                    })?;
                patch.insert("estimatedReadyAt".into(), json!(ready_at));
            }
        }
        OrderStatus::ReadyForPickup => {
            patch.insert("readyAt".into(), json!(now));
        }
        OrderStatus::OrderDelivered => {
            patch.insert("pickedUpAt".into(), json!(now));
        }
        OrderStatus::OrderCreated | OrderStatus::OrderCancelled => {}
    }
    Ok(patch)
}
