//! # HTTP リクエストハンドラ
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、判断はユースケース層に委譲する

pub mod health;
pub mod webhook;

pub use health::health_check;
pub use webhook::{WebhookState, receive_webhook};
