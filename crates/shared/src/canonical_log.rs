//! # Canonical Log Line ミドルウェア
//!
//! HTTP リクエスト完了時に、メソッド・パス・ステータス・レイテンシを 1 行に
//! まとめたサマリログを出力する tower Layer。
//!
//! TraceLayer のスパン内に配置すると、スパンフィールド（request_id）が
//! JSON ログに自動的に含まれる。
//!
//! ```text
//! TraceLayer → CanonicalLogLineLayer → handler
//! ```
//!
//! レベルはステータスで決まる: 5xx は ERROR、4xx は WARN、それ以外は INFO。
//! Webhook 送信元の不正ペイロード（400）を INFO に埋もれさせないため。

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response, StatusCode};
use tower::{Layer, Service};

/// `/health` 配下はロードバランサーから高頻度で叩かれるため出力しない
fn is_health_check_path(path: &str) -> bool {
    path.starts_with("/health")
}

/// Canonical Log Line を出力する Layer
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

fn emit(method: &str, path: &str, status: StatusCode, latency_ms: u64) {
    let status_code = status.as_u16();
    if status.is_server_error() {
        tracing::error!(
            log.r#type = "canonical",
            http.method = method,
            http.path = path,
            http.status_code = status_code,
            http.latency_ms = latency_ms,
            "リクエスト完了"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            log.r#type = "canonical",
            http.method = method,
            http.path = path,
            http.status_code = status_code,
            http.latency_ms = latency_ms,
            "リクエスト完了"
        );
    } else {
        tracing::info!(
            log.r#type = "canonical",
            http.method = method,
            http.path = path,
            http.status_code = status_code,
            http.latency_ms = latency_ms,
            "リクエスト完了"
        );
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner を使い、手元には clone を残す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path().to_owned();
        if is_health_check_path(&path) {
            return Box::pin(async move { inner.call(req).await });
        }

        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let result = inner.call(req).await;
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) => emit(&method, &path, response.status(), latency_ms),
                Err(err) => tracing::error!(
                    log.r#type = "canonical",
                    http.method = %method,
                    http.path = %path,
                    http.latency_ms = latency_ms,
                    error.message = %err,
                    "リクエスト処理エラー"
                ),
            }

            result
        })
    }
}
