//! # Relay Service サーバー
//!
//! 受注プラットフォームの Webhook を受け、注文の状態遷移を通知メールとして中継する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ALERT_EMAIL` | **Yes** | 通知の宛先 |
//! | `RELAY_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3001`） |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元（デフォルト: `ALERT_EMAIL`） |
//! | `NOTIFICATION_BACKEND` | No | `sendgrid` / `smtp` / `ses` / `noop` |
//! | `SENDGRID_API_KEY` | sendgrid 時 | SendGrid API キー |
//! | `SENDGRID_BASE_URL` | No | SendGrid API のベース URL |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP 送信先（デフォルト: `localhost:1025`） |
//! | `LOG_FORMAT` | No | `json` / `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（Mailpit 宛て）
//! ALERT_EMAIL=ops@example.com NOTIFICATION_BACKEND=smtp cargo run -p orderbell-relay
//!
//! # 本番環境
//! ALERT_EMAIL=ops@example.com SENDGRID_API_KEY=SG.xxx LOG_FORMAT=json \
//!   cargo run -p orderbell-relay --release
//! ```

mod config;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use config::{NotificationBackend, RelayConfig};
use orderbell_infra::{
    idempotency::{IdempotencyStore, InMemoryIdempotencyStore},
    notification::{
        NoopNotificationSender,
        NotificationSender,
        SendGridNotificationSender,
        SesNotificationSender,
        SmtpNotificationSender,
    },
};
use orderbell_relay::app_builder::{Recipients, build_app};
use orderbell_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Relay Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("relay-service");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "relay-service").entered();

    let config = RelayConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Relay Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let sender = build_sender(&config.notification.backend).await;
    let store: Arc<dyn IdempotencyStore> = Arc::new(InMemoryIdempotencyStore::new());

    let app = build_app(
        store,
        sender,
        Recipients {
            to:   config.notification.recipient,
            from: config.notification.from_address,
        },
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Relay Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_sender(backend: &NotificationBackend) -> Arc<dyn NotificationSender> {
    match backend {
        NotificationBackend::SendGrid { api_key, base_url } => {
            tracing::info!("通知バックエンド: SendGrid ({base_url})");
            Arc::new(SendGridNotificationSender::with_base_url(
                api_key.clone(),
                base_url.clone(),
            ))
        }
        NotificationBackend::Smtp { host, port } => {
            tracing::info!("通知バックエンド: SMTP ({host}:{port})");
            Arc::new(SmtpNotificationSender::new(host, *port))
        }
        NotificationBackend::Ses => {
            tracing::info!("通知バックエンド: Amazon SES");
            Arc::new(SesNotificationSender::from_env().await)
        }
        NotificationBackend::Noop => {
            tracing::warn!("通知バックエンド: Noop（メールは送信されません）");
            Arc::new(NoopNotificationSender)
        }
    }
}
