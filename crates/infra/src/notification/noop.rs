//! Noop 通知送信実装
//!
//! `NOTIFICATION_BACKEND=noop`、または SendGrid の API キーがない環境で選ばれる。
//! 受付パイプラインと冪等性ストアは本番と同じように動き、送るはずだったメールの
//! 宛先と件名だけがログに残る。Webhook 連携の疎通確認に使う。

use async_trait::async_trait;
use orderbell_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// 送信しない通知バックエンド
///
/// 常に成功を返すため、ディスパッチャのログには `notification.sent` が出る。
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            notification.recipient = %email.to,
            notification.subject = %email.subject,
            notification.body_bytes = email.text_body.len(),
            "Noop バックエンドのため送信せず破棄"
        );
        Ok(())
    }
}
