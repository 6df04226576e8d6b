//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **4 つの実装**: SendGrid（本番既定）、SMTP（Mailpit 開発用）、SES、Noop（通知無効化用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **認証・転送の詳細は隠蔽**: 呼び出し側は成功か失敗かだけを見る

mod noop;
mod sendgrid;
mod ses;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
use orderbell_domain::notification::{EmailMessage, NotificationError};
pub use sendgrid::{DEFAULT_BASE_URL as SENDGRID_DEFAULT_BASE_URL, SendGridNotificationSender};
pub use ses::SesNotificationSender;
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
