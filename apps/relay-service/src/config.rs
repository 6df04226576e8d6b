//! # Relay Service 設定
//!
//! 環境変数からリレーサーバーの設定を読み込む。起動時に一度だけ読み、再読込はしない。

use std::env;

use orderbell_infra::notification::SENDGRID_DEFAULT_BASE_URL;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が設定されていない
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// ポート番号として解釈できない
    #[error("{name} は有効なポート番号である必要があります: {value:?}")]
    InvalidPort { name: &'static str, value: String },

    /// 未知の通知バックエンド
    #[error("NOTIFICATION_BACKEND が不正です（sendgrid | smtp | ses | noop）: {0:?}")]
    UnknownBackend(String),
}

/// Relay Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 通知機能の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:      NotificationBackend,
    /// 通知の宛先（`ALERT_EMAIL`）
    pub recipient:    String,
    /// 送信元（未設定なら宛先と同じ）
    pub from_address: String,
}

/// 通知送信バックエンド
///
/// `NOTIFICATION_BACKEND` 環境変数で切り替える。未設定の場合、
/// `SENDGRID_API_KEY` があれば SendGrid、なければ Noop。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationBackend {
    SendGrid { api_key: String, base_url: String },
    Smtp { host: String, port: u16 },
    Ses,
    Noop,
}

impl RelayConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host:         lookup("RELAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:         parse_port("PORT", lookup("PORT"), 3001)?,
            notification: NotificationConfig::from_lookup(&lookup)?,
        })
    }
}

impl NotificationConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let recipient = lookup("ALERT_EMAIL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("ALERT_EMAIL"))?;
        let from_address = lookup("NOTIFICATION_FROM_ADDRESS")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| recipient.clone());

        let api_key = lookup("SENDGRID_API_KEY").filter(|v| !v.is_empty());
        let backend_name = lookup("NOTIFICATION_BACKEND").unwrap_or_else(|| {
            if api_key.is_some() { "sendgrid" } else { "noop" }.to_string()
        });

        let backend = match backend_name.as_str() {
            "sendgrid" => NotificationBackend::SendGrid {
                api_key:  api_key.ok_or(ConfigError::Missing("SENDGRID_API_KEY"))?,
                base_url: lookup("SENDGRID_BASE_URL")
                    .unwrap_or_else(|| SENDGRID_DEFAULT_BASE_URL.to_string()),
            },
            "smtp" => NotificationBackend::Smtp {
                host: lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_port("SMTP_PORT", lookup("SMTP_PORT"), 1025)?,
            },
            "ses" => NotificationBackend::Ses,
            "noop" => NotificationBackend::Noop,
            other => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self {
            backend,
            recipient,
            from_address,
        })
    }
}

fn parse_port(
    name: &'static str,
    value: Option<String>,
    default: u16,
) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidPort { name, value }),
    }
}
