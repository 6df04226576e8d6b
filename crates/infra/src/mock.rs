//! # テスト用モック
//!
//! ユースケース・ハンドラテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! orderbell-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use orderbell_domain::notification::{EmailMessage, NotificationError};
use tokio::sync::Notify;

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック送信
///
/// `failing()` で作成すると、記録したうえで常に `SendFailed` を返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    notify:  Arc<Notify>,
    failure: Option<String>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// 送信を試みたメール（失敗したものも含む）
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// 送信試行が `count` 件に達するまで待つ
    ///
    /// バックグラウンドで送信するテスト向け。1 秒以内に達しなければ panic する。
    pub async fn wait_for_sent(&self, count: usize) {
        let wait = async {
            loop {
                let notified = self.notify.notified();
                if self.sent.lock().unwrap().len() >= count {
                    return;
                }
                notified.await;
            }
        };

        tokio::time::timeout(Duration::from_secs(1), wait)
            .await
            .unwrap_or_else(|_| panic!("送信試行が {count} 件に達しませんでした"));
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(email.clone());
        self.notify.notify_waiters();

        match &self.failure {
            Some(reason) => Err(NotificationError::SendFailed(reason.clone())),
            None => Ok(()),
        }
    }
}
