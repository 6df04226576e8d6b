//! # イベント検証
//!
//! 生のリクエストボディが注文イベントとして受理できるかを判定する。
//!
//! 受信したペイロードと拒否理由はログに残す。ログ出力は失敗しても
//! レスポンスに影響しない（tracing はエラーを返さない）。

use orderbell_domain::order::{OrderEvent, WebhookPayload};
use orderbell_shared::{event_log::event, log_business_event};

use crate::error::RelayError;

/// 生ペイロードを検証し、注文イベントを返す
///
/// JSON として壊れている、`resource_type` が `"order"` でない、`data` がない、
/// `data.id` がない、のいずれかで [`RelayError`] を返す。
pub fn validate(raw: &[u8]) -> Result<OrderEvent, RelayError> {
    tracing::info!(payload = %String::from_utf8_lossy(raw), "Webhook を受信");

    parse(raw).inspect_err(|e| {
        log_business_event!(
            event.category = event::category::WEBHOOK,
            event.action = event::action::WEBHOOK_REJECTED,
            event.result = event::result::FAILURE,
            reason = %e,
            "注文データが不正なため拒否"
        );
    })
}

fn parse(raw: &[u8]) -> Result<OrderEvent, RelayError> {
    let payload: WebhookPayload = serde_json::from_slice(raw)?;
    Ok(payload.into_order_event()?)
}
