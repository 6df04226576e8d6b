//! # Relay Service エラー定義
//!
//! Webhook 処理で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! 上流プラットフォームはレスポンス本文をそのまま記録するだけなので、
//! JSON ではなく固定のプレーンテキストを返す。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orderbell_domain::order::InvalidOrderEvent;
use thiserror::Error;

/// 不正ペイロード時のレスポンス本文
pub const INVALID_DATA_BODY: &str = "Invalid data";

/// Relay Service で発生するエラー
#[derive(Debug, Error)]
pub enum RelayError {
    /// ボディが JSON として解釈できない
    #[error("JSON として解釈できません: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// 注文イベントとして不正
    #[error(transparent)]
    InvalidOrderEvent(#[from] InvalidOrderEvent),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::MalformedJson(_) | RelayError::InvalidOrderEvent(_) => {
                (StatusCode::BAD_REQUEST, INVALID_DATA_BODY).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn 不正な注文イベントは400とinvalid_dataになる() {
        let response = RelayError::from(InvalidOrderEvent::MissingId).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], INVALID_DATA_BODY.as_bytes());
    }

    #[test]
    fn 壊れたjsonも400になる() {
        let error = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();

        let response = RelayError::from(error).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
