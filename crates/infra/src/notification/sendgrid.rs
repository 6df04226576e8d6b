//! SendGrid 通知送信実装
//!
//! SendGrid v3 Mail Send API（`POST /v3/mail/send`）を reqwest で呼び出す。
//! 本番環境の既定バックエンド。

use async_trait::async_trait;
use orderbell_domain::notification::{EmailMessage, NotificationError};
use serde::Serialize;

use super::NotificationSender;

/// SendGrid API のベース URL
pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

/// SendGrid 通知送信
///
/// API キーは Bearer トークンとして送る。2xx 以外のレスポンスは
/// [`NotificationError::Rejected`] として返す。
pub struct SendGridNotificationSender {
    client:   reqwest::Client,
    api_key:  String,
    base_url: String,
}

impl SendGridNotificationSender {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// ベース URL を指定して作成する（プロキシやスタブサーバー向け）
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v3/mail/send", self.base_url)
    }
}

// --- Mail Send API リクエスト型 ---

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from:             Address<'a>,
    subject:          &'a str,
    content:          [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value:        &'a str,
}

impl<'a> From<&'a EmailMessage> for MailSendRequest<'a> {
    fn from(email: &'a EmailMessage) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address { email: &email.to }],
            }],
            from:             Address { email: &email.from },
            subject:          &email.subject,
            content:          [Content {
                content_type: "text/plain",
                value:        &email.text_body,
            }],
        }
    }
}

#[async_trait]
impl NotificationSender for SendGridNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&MailSendRequest::from(email))
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SendGrid 送信失敗: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(NotificationError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SendGridNotificationSender>();
    }

    #[test]
    fn リクエストボディがmail_send_apiの形になる() {
        let email = EmailMessage {
            to:        "alerts@example.com".to_string(),
            from:      "noreply@example.com".to_string(),
            subject:   "✅ Order #A1 Fulfilled".to_string(),
            text_body: "Customer: N/A".to_string(),
        };

        let body = serde_json::to_value(MailSendRequest::from(&email)).unwrap();

        assert_eq!(
            body,
            json!({
                "personalizations": [{ "to": [{ "email": "alerts@example.com" }] }],
                "from": { "email": "noreply@example.com" },
                "subject": "✅ Order #A1 Fulfilled",
                "content": [{ "type": "text/plain", "value": "Customer: N/A" }]
            })
        );
    }

    #[test]
    fn エンドポイントは末尾スラッシュを除いたベースurlから組み立てる() {
        let sut = SendGridNotificationSender::with_base_url(
            "SG.test".to_string(),
            "http://localhost:8025/".to_string(),
        );

        assert_eq!(sut.endpoint(), "http://localhost:8025/v3/mail/send");
    }

    #[tokio::test]
    async fn 接続できない場合はsend_failedを返す() {
        // ポート 9 (discard) は通常待ち受けていない
        let sut = SendGridNotificationSender::with_base_url(
            "SG.test".to_string(),
            "http://127.0.0.1:9".to_string(),
        );
        let email = EmailMessage {
            to:        "alerts@example.com".to_string(),
            from:      "noreply@example.com".to_string(),
            subject:   "subject".to_string(),
            text_body: "body".to_string(),
        };

        let result = sut.send_email(&email).await;

        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
