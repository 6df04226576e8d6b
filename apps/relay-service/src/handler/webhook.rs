//! # Webhook ハンドラ
//!
//! 受注プラットフォームからの注文イベントを受け取る。
//!
//! ```text
//! POST /webhook
//! ```
//!
//! | 結果 | ステータス | 本文 |
//! |------|-----------|------|
//! | 受付 | 200 | `OK` |
//! | 通知対象外 | 200 | `Skipped` |
//! | 重複 | 200 | `Duplicate ignored` |
//! | 不正 | 400 | `Invalid data` |
//!
//! ボディは `Json` エクストラクタを通さずバイト列のまま受け取る。
//! Content-Type が欠けていても、壊れた JSON でも、応答は `400 Invalid data` に揃う。

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode};

use crate::{error::RelayError, usecase::OrderNotificationUseCase};

/// Webhook ハンドラの State
pub struct WebhookState {
    pub usecase: OrderNotificationUseCase,
}

/// 注文イベントを受け付ける
///
/// 通知の送信完了は待たない。
#[tracing::instrument(skip_all, fields(body_len = body.len()))]
pub async fn receive_webhook(
    State(state): State<Arc<WebhookState>>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), RelayError> {
    let outcome = state.usecase.handle(&body)?;
    Ok((StatusCode::OK, outcome.body()))
}
