//! # 受付パイプライン
//!
//! 1 回の Webhook 配送を「高々 1 通の通知」に変換する。
//!
//! 検証 → 通知対象判定 → 重複判定と記録 → 組み立て → 送信投入 の順に進み、
//! 送信結果を待たずに [`AdmissionOutcome`] を返す。
//!
//! 重複判定と記録は [`IdempotencyStore::admit`] の 1 回の呼び出しで行い、
//! 間に await を挟まない。マルチスレッドランタイムでも同じ遷移が
//! 2 回通過することはない。

use std::sync::Arc;

use orderbell_infra::idempotency::IdempotencyStore;
use orderbell_shared::{event_log::event, log_business_event};

use super::{NotificationDispatcher, formatter, validator};
use crate::error::RelayError;

/// 受付結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// 受け付けて送信を投入した
    Accepted,
    /// 通知対象外のステータス
    Skipped,
    /// 同じ状態遷移を通知済み
    Duplicate,
}

impl AdmissionOutcome {
    /// レスポンス本文
    pub fn body(self) -> &'static str {
        match self {
            Self::Accepted => "OK",
            Self::Skipped => "Skipped",
            Self::Duplicate => "Duplicate ignored",
        }
    }
}

/// 注文通知ユースケース
pub struct OrderNotificationUseCase {
    store:        Arc<dyn IdempotencyStore>,
    dispatcher:   NotificationDispatcher,
    recipient:    String,
    from_address: String,
}

impl OrderNotificationUseCase {
    pub fn new(
        store: Arc<dyn IdempotencyStore>,
        dispatcher: NotificationDispatcher,
        recipient: String,
        from_address: String,
    ) -> Self {
        Self {
            store,
            dispatcher,
            recipient,
            from_address,
        }
    }

    /// Webhook ペイロードを処理する
    ///
    /// 不正なペイロードのみエラー。通知対象外・重複は正常な結果として返す。
    /// 送信はバックグラウンドで行い、ここでは待たない。
    pub fn handle(&self, raw: &[u8]) -> Result<AdmissionOutcome, RelayError> {
        let order = validator::validate(raw)?;

        if !order.is_notable() {
            log_business_event!(
                event.category = event::category::WEBHOOK,
                event.action = event::action::WEBHOOK_SKIPPED,
                event.result = event::result::IGNORED,
                order.id = %order.id,
                order.status = ?order.order_status,
                order.payment_status = ?order.payment_status,
                "通知対象外のステータスのためスキップ"
            );
            return Ok(AdmissionOutcome::Skipped);
        }

        let fingerprint = order.fingerprint();
        if !self.store.admit(fingerprint.clone()) {
            log_business_event!(
                event.category = event::category::WEBHOOK,
                event.action = event::action::WEBHOOK_DUPLICATE,
                event.result = event::result::IGNORED,
                order.id = %order.id,
                order.fingerprint = %fingerprint,
                "通知済みの状態遷移のため無視"
            );
            return Ok(AdmissionOutcome::Duplicate);
        }

        let email = formatter::compose(&order, &self.recipient, &self.from_address);

        // 結果はディスパッチャ側でログに残る
        drop(self.dispatcher.dispatch(order.id.clone(), email));

        log_business_event!(
            event.category = event::category::WEBHOOK,
            event.action = event::action::WEBHOOK_ACCEPTED,
            event.result = event::result::SUCCESS,
            order.id = %order.id,
            order.fingerprint = %fingerprint,
            "通知を受け付けました"
        );
        Ok(AdmissionOutcome::Accepted)
    }
}
