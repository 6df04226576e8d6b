//! # 注文通知リレー ライブラリ
//!
//! 受注プラットフォームの Webhook を受け、状態遷移ごとに高々 1 通の通知メールを送る。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State とルーターの組み立て
//! - `error`: エラーとレスポンス変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: 検証・判定・重複排除・整形・送信

pub mod app_builder;
pub mod error;
pub mod handler;
pub mod usecase;
