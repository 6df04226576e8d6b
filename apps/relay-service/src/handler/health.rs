//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! ```
//!
//! 冪等性ストアや送信先には触れず、プロセスが応答できることだけを示す。

use axum::Json;
use orderbell_shared::HealthResponse;

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
