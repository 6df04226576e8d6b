//! # アプリケーション構築
//!
//! 依存の注入とルーター構築を担当する。`main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use orderbell_infra::{idempotency::IdempotencyStore, notification::NotificationSender};
use orderbell_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{WebhookState, health_check, receive_webhook},
    usecase::{NotificationDispatcher, OrderNotificationUseCase},
};

/// 通知先の設定
#[derive(Debug, Clone)]
pub struct Recipients {
    /// 宛先
    pub to:   String,
    /// 送信元
    pub from: String,
}

/// State を組み立ててルーターを返す
///
/// 冪等性ストアと送信バックエンドは呼び出し側が選ぶ。
pub fn build_app(
    store: Arc<dyn IdempotencyStore>,
    sender: Arc<dyn NotificationSender>,
    recipients: Recipients,
) -> Router {
    let usecase = OrderNotificationUseCase::new(
        store,
        NotificationDispatcher::new(sender),
        recipients.to,
        recipients.from,
    );
    let webhook_state = Arc::new(WebhookState { usecase });

    Router::new()
        .route("/health", get(health_check))
        .route("/webhook", post(receive_webhook))
        .with_state(webhook_state)
        .layer(CanonicalLogLineLayer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
