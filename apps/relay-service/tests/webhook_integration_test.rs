//! # Webhook 統合テスト
//!
//! `build_app` で組み立てた本番と同じルーター（レイヤー込み）に対し、
//! 受注プラットフォームからの配送を模したリクエストを送って検証する。
//!
//! 通知送信はモックで受け、バックグラウンド送信の完了は `wait_for_sent` で待つ。

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
};
use http::{Method, Request, StatusCode};
use orderbell_infra::{idempotency::InMemoryIdempotencyStore, mock::MockNotificationSender};
use orderbell_relay::app_builder::{Recipients, build_app};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store:  Arc<InMemoryIdempotencyStore>,
    sender: MockNotificationSender,
}

fn test_app() -> TestApp {
    test_app_with(MockNotificationSender::new())
}

fn test_app_with(sender: MockNotificationSender) -> TestApp {
    let store = Arc::new(InMemoryIdempotencyStore::new());
    let router = build_app(
        store.clone(),
        Arc::new(sender.clone()),
        Recipients {
            to:   "ops@example.com".to_string(),
            from: "noreply@example.com".to_string(),
        },
    );
    TestApp {
        router,
        store,
        sender,
    }
}

fn webhook_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn post(router: &Router, payload: &Value) -> (StatusCode, String) {
    send(router, webhook_request(payload.to_string())).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn fulfilled_a1() -> Value {
    json!({
        "resource_type": "order",
        "data": {
            "id": "A1",
            "order_status": "Fulfilled",
            "payment_status": "Paid",
            "destination": { "name": "Jane Doe" },
            "requested_delivery_date": "2024-05-01",
            "order_lines": [
                { "order_qty": 2, "item_name": "Widget", "unit_price": 5, "line_total_price": 10 }
            ]
        }
    })
}

#[tokio::test]
async fn test_通知対象の注文は200_okで1通送信される() {
    let app = test_app();

    let (status, body) = post(&app.router, &fulfilled_a1()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    app.sender.wait_for_sent(1).await;
    let sent = app.sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ops@example.com");
    assert_eq!(sent[0].from, "noreply@example.com");
    assert_eq!(sent[0].subject, "✅ Order #A1 Fulfilled");
    assert_eq!(
        sent[0].text_body,
        "Customer: Jane Doe\n\
         Status: Fulfilled\n\
         Payment: Paid\n\
         Requested Delivery: 2024-05-01\n\
         \n\
         2x Widget @ $5 each = $10"
    );
}

#[tokio::test]
async fn test_同じ配送の再送は重複として無視され送信は1通のみ() {
    let app = test_app();

    let (_, first) = post(&app.router, &fulfilled_a1()).await;
    let (status, second) = post(&app.router, &fulfilled_a1()).await;

    assert_eq!(first, "OK");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, "Duplicate ignored");
    app.sender.wait_for_sent(1).await;
    tokio::task::yield_now().await;
    assert_eq!(app.sender.sent_emails().len(), 1);
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_通知対象外のステータスはskippedでストアに記録しない() {
    let app = test_app();
    let payload = json!({
        "resource_type": "order",
        "data": { "id": "A1", "order_status": "Shipped", "payment_status": "Paid" }
    });

    let (status, body) = post(&app.router, &payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Skipped");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_支払待ちは支払ステータス経由でも通知される() {
    let app = test_app();
    let payload = json!({
        "resource_type": "order",
        "data": { "id": 1042, "order_status": "Awaiting Payment", "payment_status": "Awaiting Payment" }
    });

    let (_, body) = post(&app.router, &payload).await;

    assert_eq!(body, "OK");
    app.sender.wait_for_sent(1).await;
    assert_eq!(
        app.sender.sent_emails()[0].subject,
        "💰 Payment Pending for Order #1042"
    );
}

#[tokio::test]
async fn test_欠けた項目はプレースホルダで埋めて送信する() {
    let app = test_app();
    let payload = json!({
        "resource_type": "order",
        "data": { "id": "B2", "order_status": "Delivered" }
    });

    let (_, body) = post(&app.router, &payload).await;

    assert_eq!(body, "OK");
    app.sender.wait_for_sent(1).await;
    let sent = app.sender.sent_emails();
    assert_eq!(sent[0].subject, "📦 Order #B2 Delivered");
    assert_eq!(
        sent[0].text_body,
        "Customer: N/A\n\
         Status: Delivered\n\
         Payment: N/A\n\
         Requested Delivery: N/A\n\
         \n\
         No line items."
    );
}

#[tokio::test]
async fn test_不正なペイロードは400_invalid_dataでストアに触れない() {
    let app = test_app();
    let cases = [
        json!({ "resource_type": "customer", "data": { "id": "C1" } }),
        json!({ "resource_type": "order" }),
        json!({ "resource_type": "order", "data": { "order_status": "Fulfilled" } }),
        json!({ "resource_type": "order", "data": { "id": "", "order_status": "Fulfilled" } }),
        json!({ "data": { "id": "A1", "order_status": "Fulfilled" } }),
    ];

    for payload in &cases {
        let (status, body) = post(&app.router, payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(body, "Invalid data", "payload: {payload}");
    }
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_jsonとして壊れたボディも400_invalid_data() {
    let app = test_app();

    let (status, body) = send(&app.router, webhook_request("{\"resource_type\":")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid data");
}

#[tokio::test]
async fn test_content_typeがなくてもjsonとして解釈する() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/webhook")
        .body(Body::from(fulfilled_a1().to_string()))
        .unwrap();

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_送信に失敗しても200を返し再送は重複扱い() {
    let app = test_app_with(MockNotificationSender::failing("503 Service Unavailable"));

    let (status, first) = post(&app.router, &fulfilled_a1()).await;
    app.sender.wait_for_sent(1).await;
    let (_, second) = post(&app.router, &fulfilled_a1()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, "OK");
    assert_eq!(second, "Duplicate ignored");
    assert_eq!(app.sender.sent_emails().len(), 1);
}

#[tokio::test]
async fn test_状態が進むたびに1通ずつ通知される() {
    let app = test_app();
    let transitions = [
        ("Created", "Awaiting Payment"),
        ("Created", "Paid"),
        ("Fulfilled", "Paid"),
        ("Delivered", "Paid"),
    ];

    for (order_status, payment_status) in transitions {
        let payload = json!({
            "resource_type": "order",
            "data": { "id": "A1", "order_status": order_status, "payment_status": payment_status }
        });
        let (_, body) = post(&app.router, &payload).await;
        assert_eq!(body, "OK");
    }

    app.sender.wait_for_sent(4).await;
    assert_eq!(app.store.len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_同時に届いた同一遷移は1件だけ受け付ける() {
    let app = test_app();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let router = app.router.clone();
            tokio::spawn(async move { send(&router, webhook_request(fulfilled_a1().to_string())).await })
        })
        .collect();
    let mut bodies = Vec::new();
    for handle in handles {
        let (_, body) = handle.await.unwrap();
        bodies.push(body);
    }

    let accepted = bodies.iter().filter(|b| *b == "OK").count();
    let duplicates = bodies.iter().filter(|b| *b == "Duplicate ignored").count();
    assert_eq!((accepted, duplicates), (1, 7));
    app.sender.wait_for_sent(1).await;
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_ヘルスチェックはhealthyを返す() {
    let app = test_app();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_x_request_idはクライアント提供の値をそのまま返す() {
    let app = test_app();
    let mut request = webhook_request(fulfilled_a1().to_string());
    request
        .headers_mut()
        .insert("x-request-id", "delivery-123".parse().unwrap());

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "delivery-123"
    );
}

#[tokio::test]
async fn test_x_request_idがなければuuid_v7を付与する() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(webhook_request(fulfilled_a1().to_string()))
        .await
        .unwrap();

    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(&id[14..15], "7");
}
