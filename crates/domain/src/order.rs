//! # 注文イベント
//!
//! 上流コマースプラットフォームから届く注文ライフサイクルイベントを表現する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`WebhookPayload`] | Webhook エンベロープ | `resource_type` と `data` を持つ生のリクエストボディ |
//! | [`OrderEvent`] | 注文イベント | 検証済みの注文データ |
//! | [`TransitionFingerprint`] | 状態遷移フィンガープリント | (注文 ID, 注文ステータス, 支払ステータス) の組 |
//! | [`NotableStatus`] | 通知対象ステータス | 通知を送る価値のあるステータスの許可リスト |
//!
//! ## 設計方針
//!
//! - **必須項目のみ検証**: `resource_type == "order"` と `data.id` の存在だけを要求する
//! - **ネスト項目は寛容に**: 明細行や配送先が壊れていても拒否せず「データなし」として扱う
//! - **フィンガープリントは構造体**: 区切り文字の衝突で別の遷移が同一視されないよう、
//!   文字列連結ではなく 3 要素の組で等価性を判定する

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// 値が欠けている場合に表示するプレースホルダ
pub const PLACEHOLDER: &str = "N/A";

/// Webhook の `resource_type` のうち、このパイプラインが扱う値
pub const ORDER_RESOURCE_TYPE: &str = "order";

/// 注文イベントとして受理できない理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOrderEvent {
    /// `resource_type` が `"order"` ではない（欠落を含む）
    #[error("resource_type が order ではありません: {0:?}")]
    NotAnOrder(Option<String>),

    /// `data` が存在しない
    #[error("data がありません")]
    MissingData,

    /// `data.id` が存在しない
    #[error("data.id がありません")]
    MissingId,
}

/// Webhook エンベロープ
///
/// リクエストボディをそのまま受け取る。型の不一致で失敗しないよう、
/// フィールドはすべて `serde_json::Value` で保持する。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub resource_type: Option<Value>,
    #[serde(default)]
    pub data:          Option<Value>,
}

impl WebhookPayload {
    /// 注文イベントに変換する
    ///
    /// `resource_type` が `"order"` でない、`data` がない、`data.id` がない
    /// のいずれかで失敗する。それ以外の構造チェックは行わない。
    pub fn into_order_event(self) -> Result<OrderEvent, InvalidOrderEvent> {
        match self.resource_type.as_ref().and_then(Value::as_str) {
            Some(ORDER_RESOURCE_TYPE) => {}
            _ => {
                return Err(InvalidOrderEvent::NotAnOrder(
                    self.resource_type.map(|v| match v {
                        Value::String(s) => s,
                        other => other.to_string(),
                    }),
                ));
            }
        }

        let data = match self.data {
            Some(Value::Null) | None => return Err(InvalidOrderEvent::MissingData),
            Some(data) => data,
        };

        OrderEvent::from_data(&data).ok_or(InvalidOrderEvent::MissingId)
    }
}

/// 注文 ID
///
/// 上流システムでは文字列にも数値にもなり得るため、表示用の文字列として保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// JSON 値から注文 ID を取り出す
    ///
    /// `null`・`false`・空文字列・`0` は「ID なし」。それ以外は表示用文字列にして保持する。
    pub fn from_json(value: &Value) -> Option<Self> {
        truthy_text(value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 注文明細行
///
/// 各項目は表示用文字列。欠けている項目は [`PLACEHOLDER`] になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub quantity:   String,
    pub item_name:  String,
    pub unit_price: String,
    pub line_total: String,
}

impl OrderLine {
    /// 明細行オブジェクトから変換する。オブジェクト以外は `None`。
    fn from_json(value: &Value) -> Option<Self> {
        let item = value.as_object()?;
        Some(Self {
            quantity:   render_scalar(item.get("order_qty")),
            item_name:  render_scalar(item.get("item_name")),
            unit_price: render_scalar(item.get("unit_price")),
            line_total: render_scalar(item.get("line_total_price")),
        })
    }
}

/// 注文イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEvent {
    pub id: OrderId,
    /// `None` はキー自体がない場合。`null` は [`StatusValue::Null`]
    pub order_status: Option<StatusValue>,
    pub payment_status: Option<StatusValue>,
    /// `destination.name`
    pub customer_name: Option<String>,
    pub order_lines: Vec<OrderLine>,
    pub requested_delivery_date: Option<String>,
}

impl OrderEvent {
    /// `data` オブジェクトから注文イベントを組み立てる
    ///
    /// `id` が取れない場合のみ `None`。ステータスはどの型でもそのまま保持し、
    /// その他の項目は型が合わなければ欠落扱い。
    pub fn from_data(data: &Value) -> Option<Self> {
        let id = OrderId::from_json(data.get("id")?)?;

        let order_lines = data
            .get("order_lines")
            .and_then(Value::as_array)
            .map(|lines| lines.iter().filter_map(OrderLine::from_json).collect())
            .unwrap_or_default();

        Some(Self {
            id,
            order_status: data.get("order_status").map(StatusValue::from_json),
            payment_status: data.get("payment_status").map(StatusValue::from_json),
            customer_name: data
                .get("destination")
                .and_then(|d| d.get("name"))
                .and_then(truthy_text),
            order_lines,
            requested_delivery_date: string_field(data, "requested_delivery_date"),
        })
    }

    /// このイベントの状態遷移フィンガープリント
    pub fn fingerprint(&self) -> TransitionFingerprint {
        TransitionFingerprint {
            order_id:       self.id.clone(),
            order_status:   self.order_status.clone(),
            payment_status: self.payment_status.clone(),
        }
    }

    /// 通知対象かどうか
    ///
    /// 注文ステータスと支払ステータスは独立したトリガーで、どちらか一方が
    /// 許可リストに含まれていれば通知対象になる。
    pub fn is_notable(&self) -> bool {
        [&self.order_status, &self.payment_status]
            .into_iter()
            .flatten()
            .filter_map(StatusValue::as_text)
            .any(|status| NotableStatus::parse(status).is_some())
    }
}

/// 状態遷移フィンガープリント
///
/// 同じ注文が同じ (注文ステータス, 支払ステータス) の組で観測された場合にのみ等しくなる。
/// 重複通知の抑止単位。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionFingerprint {
    order_id:       OrderId,
    order_status:   Option<StatusValue>,
    payment_status: Option<StatusValue>,
}

impl TransitionFingerprint {
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }
}

impl fmt::Display for TransitionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-", self.order_id)?;
        if let Some(status) = &self.order_status {
            write!(f, "{status}")?;
        }
        f.write_str("-")?;
        if let Some(status) = &self.payment_status {
            write!(f, "{status}")?;
        }
        Ok(())
    }
}

/// ステータス値
///
/// 型が崩れた値でも別の遷移として区別できるよう、文字列以外は JSON 表現で保持する。
/// 許可リストと照合するのは文字列だけ。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusValue {
    Text(String),
    Null,
    /// 数値・真偽値・配列・オブジェクト
    Other(String),
}

impl StatusValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Null => Self::Null,
            Value::Number(n) => Self::Other(render_number(n)),
            other => Self::Other(other.to_string()),
        }
    }

    /// 文字列のステータスならその値
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Null | Self::Other(_) => None,
        }
    }

    /// 本文に出す文字列。`null` は [`PLACEHOLDER`]
    pub fn rendered(&self) -> &str {
        match self {
            Self::Text(s) | Self::Other(s) => s,
            Self::Null => PLACEHOLDER,
        }
    }
}

impl From<&str> for StatusValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Other(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
        }
    }
}

/// 通知対象ステータス（許可リスト）
///
/// 注文ステータス・支払ステータスの両方に対して同じリストを使う。
/// 比較は大文字小文字を区別する完全一致。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr, strum::Display,
)]
pub enum NotableStatus {
    Created,
    Fulfilled,
    Delivered,
    #[strum(serialize = "Awaiting Payment")]
    AwaitingPayment,
}

impl NotableStatus {
    pub fn parse(status: &str) -> Option<Self> {
        status.parse().ok()
    }
}

fn string_field(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

/// 偽とみなす値（`null`, `false`, 空文字列, `0`）は `None`
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(render_number(n)),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}

fn render_scalar(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => render_number(n),
        _ => PLACEHOLDER.to_string(),
    }
}

/// 整数値の浮動小数（`5.0`）は `5` と表示する
fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}
