//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 通知送信の失敗は Webhook のレスポンスに影響しない
//! - **メッセージ生成の分離**: 件名・本文の組み立ては relay-service のフォーマッタが担う

use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗（ネットワーク、接続、メッセージ構築など）
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// 送信プロバイダがリクエストを拒否した
    #[error("送信プロバイダが拒否: status={status}, detail={detail}")]
    Rejected { status: u16, detail: String },

    /// メールアドレスが不正
    #[error("メールアドレスが不正: {0}")]
    InvalidAddress(String),
}

/// メールメッセージ
///
/// フォーマッタの出力。NotificationSender に渡される。
/// 送信が終われば破棄され、どこにも保持されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 送信元メールアドレス
    pub from:      String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
}
