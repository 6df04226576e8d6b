//! # 通知ディスパッチャ
//!
//! 通知メールの送信をバックグラウンドタスクとして投入する。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: `dispatch()` はタスクを spawn してすぐ戻る。Webhook の
//!   レスポンスは送信完了を待たない
//! - **結果は JoinHandle で観測**: 呼び出し側はハンドルを捨ててもよいし、
//!   テストのように await して [`DispatchOutcome`] を確認してもよい
//! - **再送しない**: 失敗はログに残すだけ。冪等性ストアの記録も取り消さない
//! - **タイムアウトなし**: 送信が固まってもレスポンス経路には影響しない

use std::sync::Arc;

use orderbell_domain::{notification::EmailMessage, order::OrderId};
use orderbell_infra::notification::NotificationSender;
use orderbell_shared::{event_log::event, log_business_event, log_business_failure};
use tokio::task::JoinHandle;

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 送信成功
    Sent,
    /// 送信失敗（エラー詳細）
    Failed(String),
}

/// 通知ディスパッチャ
#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: Arc<dyn NotificationSender>,
}

impl NotificationDispatcher {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    /// 通知をバックグラウンドで送信する
    ///
    /// Tokio ランタイム上で呼ぶこと。
    pub fn dispatch(&self, order_id: OrderId, email: EmailMessage) -> JoinHandle<DispatchOutcome> {
        let sender = Arc::clone(&self.sender);
        tokio::spawn(async move { send(sender.as_ref(), &order_id, &email).await })
    }
}

async fn send(
    sender: &dyn NotificationSender,
    order_id: &OrderId,
    email: &EmailMessage,
) -> DispatchOutcome {
    match sender.send_email(email).await {
        Ok(()) => {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SENT,
                event.result = event::result::SUCCESS,
                order.id = %order_id,
                notification.recipient = %email.to,
                "通知メール送信成功"
            );
            DispatchOutcome::Sent
        }
        Err(e) => {
            log_business_failure!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_FAILED,
                event.result = event::result::FAILURE,
                order.id = %order_id,
                notification.recipient = %email.to,
                error = %e,
                "通知メール送信失敗"
            );
            DispatchOutcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use orderbell_infra::mock::MockNotificationSender;

    use super::*;

    fn email() -> EmailMessage {
        EmailMessage {
            to:        "ops@example.com".to_string(),
            from:      "ops@example.com".to_string(),
            subject:   "📦 Order #A1 Delivered".to_string(),
            text_body: "Customer: N/A".to_string(),
        }
    }

    #[tokio::test]
    async fn 送信成功でsentを返す() {
        let sender = MockNotificationSender::new();
        let sut = NotificationDispatcher::new(Arc::new(sender.clone()));

        let outcome = sut.dispatch(OrderId::new("A1"), email()).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(sender.sent_emails(), vec![email()]);
    }

    #[tokio::test]
    async fn 送信失敗でfailedを返し再送しない() {
        let sender = MockNotificationSender::failing("401 Unauthorized");
        let sut = NotificationDispatcher::new(Arc::new(sender.clone()));

        let outcome = sut.dispatch(OrderId::new("A1"), email()).await.unwrap();

        assert!(matches!(outcome, DispatchOutcome::Failed(detail) if detail.contains("401")));
        assert_eq!(sender.sent_emails().len(), 1);
    }
}
