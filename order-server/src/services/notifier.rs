//! Real-time order notifications (Socket.IO)
//!
//! # 房间
//!
//! | 房间 | 订阅者 | 加入事件 |
//! |------|--------|----------|
//! | `{orderId}` | 下单顾客 | `order_joined {orderId}` |
//! | `{restaurantId}` | 门店看板 | `store_joined {restaurantId, locationId?}` |
//! | `{restaurantId}_{locationId}` | 门店看板 | `store_joined` |
//!
//! 状态变更事件 (`order_accepted` / `order_ready_for_pickup` / `order_completed`)
//! 同时推送到订单房间和餐厅房间。推送是 best-effort，失败只记日志。

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::models::OrderEvent;
use socketioxide::SocketIo;
use socketioxide::extract::{Data, SocketRef};

/// Publishes order status changes
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// Publish `event` under `event_name` to the order room and the restaurant room
    async fn order_status_changed(&self, event_name: &'static str, event: &OrderEvent);
}

// =============================================================================
// Socket.IO
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderJoined {
    order_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderJoinedAck {
    order_id: String,
    success: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreJoined {
    restaurant_id: String,
    #[serde(default)]
    location_id: Option<String>,
}

/// Socket.IO backed notifier
#[derive(Clone)]
pub struct SocketNotifier {
    io: SocketIo,
}

impl SocketNotifier {
    /// Register the connection handlers on the default namespace
    pub fn new(io: SocketIo) -> Self {
        io.ns("/", on_connect);
        Self { io }
    }

    async fn emit_to(&self, room: &str, event_name: &'static str, event: &OrderEvent) {
        if let Err(e) = self.io.to(room.to_string()).emit(event_name, event).await {
            tracing::warn!(
                room = %room,
                event = event_name,
                error = %e,
                "Failed to broadcast order event"
            );
        }
    }
}

#[async_trait]
impl OrderNotifier for SocketNotifier {
    async fn order_status_changed(&self, event_name: &'static str, event: &OrderEvent) {
        self.emit_to(&event.order_id, event_name, event).await;
        self.emit_to(&event.restaurant_id, event_name, event).await;
        tracing::info!(
            order_id = %event.order_id,
            restaurant_id = %event.restaurant_id,
            event = event_name,
            "Order event published"
        );
    }
}

async fn on_connect(socket: SocketRef) {
    tracing::debug!(socket_id = %socket.id, "Socket connected");
    socket.on("order_joined", on_order_joined);
    socket.on("store_joined", on_store_joined);
    socket.on_disconnect(on_disconnect);
}

async fn on_disconnect(socket: SocketRef) {
    tracing::debug!(socket_id = %socket.id, "Socket disconnected");
}

async fn on_order_joined(socket: SocketRef, Data(data): Data<OrderJoined>) {
    tracing::debug!(socket_id = %socket.id, order_id = %data.order_id, "Joined order room");
    socket.join(data.order_id.clone());
    let ack = OrderJoinedAck {
        order_id: data.order_id,
        success: true,
    };
    if let Err(e) = socket.emit("order_joined_ack", &ack) {
        tracing::warn!(socket_id = %socket.id, error = %e, "Failed to acknowledge order_joined");
    }
}

async fn on_store_joined(socket: SocketRef, Data(data): Data<StoreJoined>) {
    tracing::debug!(
        socket_id = %socket.id,
        restaurant_id = %data.restaurant_id,
        "Joined store rooms"
    );
    socket.join(data.restaurant_id.clone());
    if let Some(location_id) = data.location_id.filter(|l| !l.is_empty()) {
        socket.join(format!("{}_{}", data.restaurant_id, location_id));
    }
}

// =============================================================================
// In-process recorder
// =============================================================================

/// Keeps every published event in memory, in publish order
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(String, OrderEvent)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(event name, payload)` pairs published so far
    pub fn events(&self) -> Vec<(String, OrderEvent)> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl OrderNotifier for RecordingNotifier {
    async fn order_status_changed(&self, event_name: &'static str, event: &OrderEvent) {
        self.events.lock().push((event_name.to_string(), event.clone()));
    }
}
