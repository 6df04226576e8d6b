//! # ユースケース層
//!
//! Webhook で届いた注文イベントを、重複なしの通知メールに変換する。
//!
//! ## 処理の流れ
//!
//! ```text
//! 生ペイロード → validator → 通知対象判定 → 冪等性ストア → formatter → dispatcher
//!                  ↓ 400        ↓ Skipped      ↓ Duplicate ignored          ↓ 待たない
//! ```
//!
//! ## モジュール構成
//!
//! - [`validator`] - 生ペイロードの検証
//! - [`formatter`] - 件名・本文の組み立て
//! - [`dispatcher`] - バックグラウンドでの通知送信
//! - [`admission`] - 上記をつなぐ受付パイプライン

pub mod admission;
pub mod dispatcher;
pub mod formatter;
pub mod validator;

pub use admission::{AdmissionOutcome, OrderNotificationUseCase};
pub use dispatcher::{DispatchOutcome, NotificationDispatcher};
