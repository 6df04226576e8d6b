//! # ビジネスイベントログの構造化ヘルパー
//!
//! Webhook の受付判断と通知送信結果を `jq` で追えるよう、ログフィールドの
//! 命名規約とヘルパーマクロを提供する。
//!
//! [`log_business_event!`] で出力したログには `event.kind = "business_event"` が付き、
//! `jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! フィールド名はドット記法（`event.category`、`order.id`）を使う。JSON 出力では
//! フラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: [`event::category`] の定数
/// - `event.action`: [`event::action`] の定数
/// - `event.result`: [`event::result`] の定数
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// 失敗を表すビジネスイベントを `tracing::error!` レベルで出力する。
///
/// フィールド規約は [`log_business_event!`] と同じ。
#[macro_export]
macro_rules! log_business_failure {
    ($($args:tt)*) => {
        ::tracing::error!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const WEBHOOK: &str = "webhook";
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        // Webhook 受付
        pub const WEBHOOK_ACCEPTED: &str = "webhook.accepted";
        pub const WEBHOOK_SKIPPED: &str = "webhook.skipped";
        pub const WEBHOOK_DUPLICATE: &str = "webhook.duplicate";
        pub const WEBHOOK_REJECTED: &str = "webhook.rejected";

        // 通知
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
        pub const IGNORED: &str = "ignored";
    }
}
