//! # OrderBell 共有ユーティリティ
//!
//! ビジネスロジックを含まない横断的なユーティリティを提供する。
//!
//! - [`observability`] - トレーシング初期化とリクエストスパン
//! - `canonical_log` - リクエスト完了サマリログ（`observability` feature）
//! - [`event_log`] - ビジネスイベントログのマクロとフィールド定数
//! - [`health`] - ヘルスチェックレスポンス型

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod event_log;
pub mod health;
pub mod observability;

pub use health::HealthResponse;
