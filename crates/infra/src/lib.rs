//! # OrderBell インフラ層
//!
//! 外部システムとの接続・通信と、プロセス内の共有状態を担当する。
//!
//! ## 責務
//!
//! - **通知送信**: SendGrid / SMTP / SES / Noop によるメール送信
//! - **冪等性ストア**: 通知済みの状態遷移フィンガープリントの保持
//!
//! ## 依存関係
//!
//! ```text
//! relay-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`idempotency`] - 重複通知抑止のためのフィンガープリントストア
//! - [`notification`] - メール送信トレイトと各実装
//! - `mock` - テスト用モック（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use orderbell_infra::{
//!     idempotency::{IdempotencyStore, InMemoryIdempotencyStore},
//!     notification::{NotificationSender, SendGridNotificationSender},
//! };
//!
//! let store: Arc<dyn IdempotencyStore> = Arc::new(InMemoryIdempotencyStore::new());
//! let sender: Arc<dyn NotificationSender> =
//!     Arc::new(SendGridNotificationSender::new("SG.xxxxx".to_string()));
//! ```

pub mod idempotency;
pub mod notification;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
