//! Dashboard, report, user and health endpoints

mod common;

use common::{TestApp, burger_cart};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_root_and_health() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Welcome to OrderBuddy API");

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");

    let (_, body) = app.get("/socket-status").await;
    assert_eq!(body["data"]["endpoint"], "/socket.io");
}

#[tokio::test]
async fn test_menu_create_list_and_get() {
    let app = TestApp::new().await;
    let base = "/restaurant/restaurants/r1/locations/l1";

    let (status, body) = app.get(&format!("{}/menus", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = app
        .post(
            &format!("{}/menu", base),
            json!({ "menuSlug": "lunch", "name": { "en": "Lunch" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["_id"], "r1_menu_lunch");

    let (status, _) = app
        .post(
            &format!("{}/menu", base),
            json!({ "menuSlug": "lunch", "name": { "en": "Lunch again" } }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .post(
            "/restaurant/r1/location/l1/menu/r1_menu_lunch/category",
            json!({
                "name": { "en": "Mains" },
                "description": { "en": "Hot food" },
                "sortOrder": 0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"], true);

    let (status, body) = app
        .get("/api/v1/order-app/restaurants/r1/locations/l1/menus/r1_menu_lunch")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["categories"][0]["name"]["en"], "Mains");

    let (status, body) = app.get(&format!("{}/menus/missing", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_sales_summary_counts_delivered_orders() {
    let app = TestApp::new().await;
    let (_, body) = app
        .post("/api/v1/order-app/orders", burger_cart())
        .await;
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();

    let (_, body) = app.get("/report/sales_summary/r1/l1").await;
    let days = body["data"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert!(days.iter().all(|d| d["grossSales"] == 0.0));

    app.patch(
        "/api/v1/order-app/orders/status",
        json!({ "orderId": order_id, "status": "order_delivered" }),
    )
    .await;

    let (status, body) = app.get("/api/v1/report/sales_summary/r1/l1?days=3").await;
    assert_eq!(status, StatusCode::OK);
    let days = body["data"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[2]["grossSales"], 5.38);

    let (status, _) = app.get("/report/sales_summary/r1/l1?days=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_sync() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/v1/users/create-user", json!({ "userId": "ext-1" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/users/create-user",
            json!({ "userId": "ext-1", "phoneNumber": "+15550009" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let internal = body["data"]["userId"].as_str().unwrap().to_string();

    let (_, body) = app
        .post(
            "/users/create-user",
            json!({ "userId": "ext-1", "email": "ana@example.com" }),
        )
        .await;
    assert_eq!(body["data"]["userId"], internal.as_str());

    let (status, body) = app
        .post("/restaurant/create/ext-1", json!({ "name": "Ana's" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let restaurant_id = body["data"]["_id"].as_str().unwrap().to_string();

    let (_, body) = app.get("/restaurant/ext-1").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["_id"], restaurant_id.as_str());

    for _ in 0..2 {
        let (status, body) = app
            .post("/users/delete-user", json!({ "userId": "ext-1" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "User deleted");
    }
}

#[tokio::test]
async fn test_lookup_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/order-app/restaurants/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Restaurant not found");

    let (status, _) = app.get("/api/v1/order-app/restaurants/origins/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/stations/r1/l1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/campaign/restaurant/r1/location/l1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

/// Delivered order stamped at `at` (Unix millis)
fn delivered_order(
    id: &str,
    at: i64,
    origin: &str,
    items: serde_json::Value,
    total: i64,
) -> serde_json::Value {
    json!({
        "_id": id,
        "orderId": id,
        "restaurantId": "r1",
        "locationId": "l1",
        "locationSlug": "downtown",
        "origin": { "id": origin, "name": origin },
        "customer": { "name": "Ana" },
        "items": items,
        "status": "order_delivered",
        "subtotalCents": total,
        "taxCents": 0,
        "totalCents": total,
        "createdAt": at,
        "updatedAt": at,
        "pickedUpAt": at
    })
}

fn line(menu_item_id: &str, name: &str, price: i64, quantity: i64) -> serde_json::Value {
    json!({
        "id": format!("{menu_item_id}-{quantity}"),
        "menuItemId": menu_item_id,
        "name": name,
        "price": price,
        "quantity": quantity,
        "subtotalCents": price * quantity
    })
}

/// New York location with three delivered orders around 2024-01-15
///
/// 2024-01-15 在 America/New_York 是 [05:00Z, 次日 05:00Z)。
async fn seeded_reports() -> TestApp {
    let app = TestApp::new().await;
    app.seed(
        "locations",
        json!({
            "_id": "l1",
            "restaurantId": "r1",
            "name": "Downtown",
            "timezone": "America/New_York"
        }),
    )
    .await;
    // 当地 1 月 14 日 22:00
    app.seed(
        "orders",
        delivered_order(
            "ORD-EARLY",
            1_705_287_600_000,
            "table-1",
            json!([line("burger", "Burger", 499, 4)]),
            1996,
        ),
    )
    .await;
    app.seed(
        "orders",
        delivered_order(
            "ORD-NOON",
            1_705_320_000_000,
            "table-1",
            json!([line("burger", "Burger", 499, 2)]),
            1078,
        ),
    )
    .await;
    // 当地 1 月 15 日 23:30 (UTC 已是 16 日)
    app.seed(
        "orders",
        delivered_order(
            "ORD-LATE",
            1_705_379_400_000,
            "table-2",
            json!([line("fries", "Fries", 300, 1), line("burger", "Burger", 499, 1)]),
            858,
        ),
    )
    .await;
    let mut other = delivered_order(
        "ORD-OTHER",
        1_705_320_000_000,
        "table-1",
        json!([line("burger", "Burger", 499, 9)]),
        4491,
    );
    other["locationId"] = json!("l2");
    app.seed("orders", other).await;
    app
}

#[tokio::test]
async fn test_order_history_uses_location_day() {
    let app = seeded_reports().await;

    let (status, body) = app.get("/report/order_history/r1/l1/2024-01-15").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["orderId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ORD-LATE", "ORD-NOON"]);

    let (_, body) = app.get("/api/v1/report/order_history/r1/l1/2024-01-14").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["orderId"], "ORD-EARLY");

    let (status, body) = app.get("/report/order_history/r1/l1/15-01-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_sales_by_item() {
    let app = seeded_reports().await;

    let (status, body) = app.get("/report/sales_by_item/r1/l1/2024-01-15").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        body["data"],
        json!([
            { "menuItemId": "burger", "itemName": "Burger", "soldCount": 3, "grossSales": 14.97 },
            { "menuItemId": "fries", "itemName": "Fries", "soldCount": 1, "grossSales": 3.0 }
        ])
    );

    let (status, body) = app.get("/report/sales_by_item/r1/l1/2024-02-30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("2024-02-30"));
}

#[tokio::test]
async fn test_sales_by_origin() {
    let app = seeded_reports().await;

    let (status, body) = app.get("/api/v1/report/sales_by_origin/r1/l1/2024-01-15").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        body["data"],
        json!([
            { "originId": "table-1", "name": "table-1", "soldCount": 2, "grossSales": 10.78 },
            { "originId": "table-2", "name": "table-2", "soldCount": 2, "grossSales": 8.58 }
        ])
    );

    let (_, body) = app.get("/report/sales_by_origin/r1/l1/2023-12-25").await;
    assert_eq!(body["data"], json!([]));

    let (status, _) = app.get("/report/sales_by_origin/r1/l1/yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_location() {
    let app = TestApp::new().await;
    app.seed("restaurants", json!({ "_id": "r1", "name": "Ana's" })).await;

    let (status, body) = app
        .post(
            "/api/v1/restaurant/r1/location/create",
            json!({ "name": "Uptown", "timezone": "America/Chicago" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["restaurantId"], "r1");
    assert_eq!(body["data"]["name"], "Uptown");
    assert_eq!(body["data"]["isActive"], true);
    assert_eq!(body["data"]["timezone"], "America/Chicago");
    let location_id = body["data"]["_id"].as_str().unwrap().to_string();

    let (_, body) = app.get("/restaurant/restaurants/r1/locations").await;
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["_id"], location_id.as_str());

    let (status, body) = app
        .post("/restaurant/nope/location/create", json!({ "name": "Ghost" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Restaurant not found");
}

#[tokio::test]
async fn test_origins_listing_shape() {
    let app = TestApp::new().await;
    app.seed(
        "locations",
        json!({
            "_id": "l1",
            "restaurantId": "r1",
            "name": "Downtown",
            "qrCodeStyle": { "color": "#000000" },
            "qrCodeImage": "https://cdn.example.com/qr.png"
        }),
    )
    .await;
    app.seed(
        "origins",
        json!({
            "_id": "o1",
            "restaurantId": "r1",
            "locationId": "l1",
            "label": "Table 1",
            "type": "table"
        }),
    )
    .await;

    let (status, body) = app.get("/origins/r1/l1").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["qrCodeStyle"], json!({ "color": "#000000" }));
    assert_eq!(body["data"]["qrCodeImage"], "https://cdn.example.com/qr.png");
    assert_eq!(body["data"]["originData"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["originData"][0]["_id"], "o1");

    // 门店不属于 r2: 不泄露二维码样式
    let (status, body) = app.get("/api/v1/origins/r2/l1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["qrCodeStyle"], serde_json::Value::Null);
    assert_eq!(body["data"]["originData"], json!([]));
}

#[tokio::test]
async fn test_location_lookups_are_scoped_to_restaurant() {
    let app = TestApp::new().await;
    app.seed(
        "locations",
        json!({
            "_id": "l1",
            "restaurantId": "r1",
            "name": "Downtown",
            "printers": [{ "name": "Kitchen", "ip": "10.0.0.5" }]
        }),
    )
    .await;

    let (status, body) = app.get("/printers/r1/l1").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"][0]["name"], "Kitchen");

    let (status, body) = app.get("/printers/r2/l1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Location not found");

    let (status, _) = app.get("/printers/r1/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/v1/order-app/restaurants/r1/locations/l1").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get("/api/v1/order-app/restaurants/r2/locations/l1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
