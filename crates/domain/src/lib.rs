//! # OrderBell ドメイン層
//!
//! 注文ライフサイクル通知の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **純粋性**: HTTP、メール送信、状態保持には一切依存しない
//! - **寛容な入力解釈**: 上流プラットフォームの Webhook は形が揃っていないことがあるため、
//!   必須項目（`resource_type`, `data.id`）以外は「データなし」として扱う
//!
//! ## 依存関係の方向
//!
//! ```text
//! relay-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`order`] - 注文イベント、状態遷移フィンガープリント、通知対象ステータス
//! - [`notification`] - メールメッセージと送信エラー
//!
//! ## 使用例
//!
//! ```rust
//! use orderbell_domain::order::WebhookPayload;
//!
//! let payload: WebhookPayload = serde_json::from_str(
//!     r#"{"resource_type":"order","data":{"id":"A1","order_status":"Fulfilled"}}"#,
//! )
//! .unwrap();
//! let event = payload.into_order_event().unwrap();
//!
//! assert!(event.is_notable());
//! assert_eq!(event.fingerprint().to_string(), "A1-Fulfilled-");
//! ```

pub mod notification;
pub mod order;
