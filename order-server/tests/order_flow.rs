//! Preview → order → status lifecycle through the HTTP API

mod common;

use common::{TestApp, burger_cart};
use http::StatusCode;
use serde_json::json;

const ORDER_APP: &str = "/api/v1/order-app";
const PAYMENTS: &str = "/api/v1/payments";

async fn preview(app: &TestApp) -> String {
    let (status, body) = app
        .post(&format!("{}/cart/preview-order", ORDER_APP), burger_cart())
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["previewOrderId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_preview_then_place_without_payment() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(&format!("{}/cart/preview-order", ORDER_APP), burger_cart())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["subtotalCents"], 499);
    assert_eq!(data["taxCents"], 39);
    assert_eq!(data["totalPriceCents"], 538);
    assert_eq!(data["items"][0]["subtotalCents"], 499);
    let preview_id = data["previewOrderId"].as_str().unwrap().to_string();
    assert!(preview_id.starts_with("PREV-"));

    let (status, body) = app
        .post(
            &format!("{}/place-order-without-payment", PAYMENTS),
            json!({ "previewOrderId": preview_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Order placed successfully");
    assert_eq!(body["data"]["status"], "order_created");
    assert_eq!(body["data"]["paymentStatus"], "not_required");
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();
    assert!(order_id.starts_with("ORD-"));

    let (status, body) = app.get(&format!("{}/orders/{}", ORDER_APP, order_id)).await;
    assert_eq!(status, StatusCode::OK);
    let order = &body["data"];
    assert_eq!(order["_id"], order_id.as_str());
    assert_eq!(order["subtotalCents"], 499);
    assert_eq!(order["taxCents"], 39);
    assert_eq!(order["totalCents"], 538);
    assert_eq!(order["transactionDetails"]["paymentMethod"], "cash");
    assert_eq!(order["origin"]["id"], "table-1");

    // 预览单已被消费
    let (status, body) = app
        .post(
            &format!("{}/place-order-without-payment", PAYMENTS),
            json!({ "previewOrderId": preview_id }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Preview order not found");
}

#[tokio::test]
async fn test_complete_transaction() {
    let app = TestApp::new().await;
    let preview_id = preview(&app).await;

    let (status, body) = app
        .post(&format!("{}/start-transaction/r1", PAYMENTS), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["transactionToken"].as_str().unwrap().to_string();
    assert!(token.starts_with("TXN-"));
    assert!(body["data"]["externalTransactionId"].as_str().unwrap().starts_with("EXT-"));

    // 缺少 token
    let (status, _) = app
        .post(
            &format!("{}/complete-transaction", PAYMENTS),
            json!({ "previewOrderId": preview_id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            &format!("{}/complete-transaction", PAYMENTS),
            json!({ "previewOrderId": preview_id, "transactionToken": token }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["transaction"]["resultStatus"], "Approved");
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();

    let (_, body) = app.get(&format!("{}/orders/{}", ORDER_APP, order_id)).await;
    let details = &body["data"]["transactionDetails"];
    assert_eq!(details["transactionToken"], token.as_str());
    assert_eq!(details["amountCents"], 538);
    assert_eq!(body["data"]["paymentId"], details["transactionId"]);
}

#[tokio::test]
async fn test_status_lifecycle_publishes_events() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(&format!("{}/orders", ORDER_APP), burger_cart())
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "order_created");

    let (status, body) = app
        .patch(
            &format!("{}/orders/status", ORDER_APP),
            json!({ "orderId": order_id, "status": "order_accepted", "estimatedMinutes": 15 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "order_accepted");
    let updated_at = body["data"]["updatedAt"].as_i64().unwrap();
    assert_eq!(
        body["data"]["estimatedReadyAt"].as_i64().unwrap(),
        updated_at + 15 * 60_000
    );

    for status in ["ready_for_pickup", "order_delivered"] {
        let (code, _) = app
            .patch(
                &format!("{}/orders/status", ORDER_APP),
                json!({ "orderId": order_id, "status": status }),
            )
            .await;
        assert_eq!(code, StatusCode::OK);
    }

    let (_, body) = app
        .get(&format!("{}/orders/{}/status", ORDER_APP, order_id))
        .await;
    assert_eq!(body["data"]["status"], "order_delivered");

    let (_, body) = app.get(&format!("{}/orders/{}", ORDER_APP, order_id)).await;
    assert!(body["data"]["readyAt"].is_i64());
    assert!(body["data"]["pickedUpAt"].is_i64());

    let events: Vec<String> = app.notifier.events().into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        events,
        vec!["order_accepted", "order_ready_for_pickup", "order_completed"]
    );
    let (_, last) = app.notifier.events().pop().unwrap();
    assert_eq!(last.order_id, order_id);
    assert_eq!(last.restaurant_id, "r1");

    // 取消不推送
    app.patch(
        &format!("{}/orders/status", ORDER_APP),
        json!({ "orderId": order_id, "status": "order_cancelled" }),
    )
    .await;
    assert_eq!(app.notifier.events().len(), 3);
}

#[tokio::test]
async fn test_order_validation_and_missing_order() {
    let app = TestApp::new().await;

    let mut cart = burger_cart();
    cart["items"] = json!([]);
    let (status, body) = app
        .post(&format!("{}/cart/preview-order", ORDER_APP), cart)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut cart = burger_cart();
    cart["items"][0]["quantity"] = json!(0);
    let (status, _) = app.post(&format!("{}/orders", ORDER_APP), cart).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get(&format!("{}/orders/ORD-MISSING", ORDER_APP)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Order not found");

    let (status, _) = app
        .patch(
            &format!("{}/orders/status", ORDER_APP),
            json!({ "orderId": "ORD-MISSING", "status": "order_accepted" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preview_uses_menu_sales_tax() {
    let app = TestApp::new().await;
    app.seed(
        "menus",
        json!({
            "_id": "r1_menu_main",
            "restaurantId": "r1",
            "locationId": "l1",
            "menuSlug": "main",
            "salesTax": 10.25,
            "categories": [],
            "items": []
        }),
    )
    .await;

    let mut cart = burger_cart();
    cart["menuId"] = json!("r1_menu_main");
    cart["items"][0]["price"] = json!(1000);
    let (status, body) = app
        .post(&format!("{}/cart/preview-order", ORDER_APP), cart)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["taxCents"], 102);
    assert_eq!(body["data"]["totalPriceCents"], 1102);
}

#[tokio::test]
async fn test_dashboard_status_update() {
    let app = TestApp::new().await;
    let (_, body) = app
        .post(&format!("{}/orders", ORDER_APP), burger_cart())
        .await;
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/restaurant/order-status/",
            json!({ "orderId": order_id, "orderStatus": "OrderCompleted" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "OrderCompleted");

    let (_, body) = app
        .get(&format!("/restaurant/orders/r1/l1/{}", order_id))
        .await;
    assert_eq!(body["data"]["status"], "order_delivered");
    assert_eq!(body["data"]["orderCode"], order_id.as_str());
    assert!(body["data"]["endedAt"].is_i64());

    let (status, _) = app
        .post(
            "/api/v1/restaurant/order-status/",
            json!({ "orderId": order_id, "orderStatus": "Unknown" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/restaurant/orders/today/r1/l1").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_out_of_range_amounts_are_rejected() {
    let app = TestApp::new().await;

    // 2^62 × 4 超出 i64
    let mut cart = burger_cart();
    cart["items"][0]["price"] = json!(4_611_686_018_427_387_904_i64);
    cart["items"][0]["quantity"] = json!(4);
    let (status, body) = app
        .post(&format!("{}/cart/preview-order", ORDER_APP), cart.clone())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["code"], 4103);
    assert_eq!(body["details"]["itemId"], "line-1");

    let (status, body) = app.post(&format!("{}/orders", ORDER_APP), cart).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4103);

    let mut cart = burger_cart();
    cart["items"][0]["price"] = json!(i64::MAX);
    cart["discount"] = json!({ "amountCents": i64::MIN });
    let (status, _) = app
        .post(&format!("{}/cart/preview-order", ORDER_APP), cart)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.post(&format!("{}/orders", ORDER_APP), burger_cart()).await;
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();
    let (status, body) = app
        .patch(
            &format!("{}/orders/status", ORDER_APP),
            json!({
                "orderId": order_id,
                "status": "order_accepted",
                "estimatedMinutes": i64::MAX / 1_000
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["code"], 8);

    let (_, body) = app.get(&format!("{}/orders/{}", ORDER_APP, order_id)).await;
    assert_eq!(body["data"]["status"], "order_created");
    assert!(app.notifier.events().is_empty());
}
