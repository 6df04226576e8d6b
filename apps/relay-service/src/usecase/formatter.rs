//! # メッセージフォーマッタ
//!
//! 注文イベントから通知メールの件名と本文を組み立てる。
//!
//! どの関数も全域で、入力が欠けていてもプレースホルダで埋めて必ず文字列を返す。
//! 冪等性ストアには触れない。
//!
//! ## 本文の形
//!
//! ```text
//! Customer: Jane Doe
//! Status: Fulfilled
//! Payment: Paid
//! Requested Delivery: 2024-05-01
//!
//! 2x Widget @ $5 each = $10
//! ```

use itertools::Itertools;
use orderbell_domain::{
    notification::EmailMessage,
    order::{NotableStatus, OrderEvent, OrderId, OrderLine, PLACEHOLDER, StatusValue},
};

/// 明細行がない場合の本文
pub const NO_LINE_ITEMS: &str = "No line items.";

/// 件名を決める
///
/// 注文ステータスだけを見る。支払ステータス経由で通知対象になったイベントや
/// `Created` は汎用の件名になる。
pub fn subject_for(order_status: Option<&str>, order_id: &OrderId) -> String {
    match order_status.and_then(NotableStatus::parse) {
        Some(NotableStatus::Fulfilled) => format!("✅ Order #{order_id} Fulfilled"),
        Some(NotableStatus::AwaitingPayment) => format!("💰 Payment Pending for Order #{order_id}"),
        Some(NotableStatus::Delivered) => format!("📦 Order #{order_id} Delivered"),
        Some(NotableStatus::Created) | None => format!("📋 Order #{order_id} Update"),
    }
}

/// 本文を組み立てる
pub fn body_for(event: &OrderEvent) -> String {
    let lines = if event.order_lines.is_empty() {
        NO_LINE_ITEMS.to_string()
    } else {
        event.order_lines.iter().map(line_for).join("\n")
    };

    format!(
        "Customer: {}\nStatus: {}\nPayment: {}\nRequested Delivery: {}\n\n{}",
        or_placeholder(event.customer_name.as_deref()),
        or_placeholder(event.order_status.as_ref().map(StatusValue::rendered)),
        or_placeholder(event.payment_status.as_ref().map(StatusValue::rendered)),
        or_placeholder(event.requested_delivery_date.as_deref()),
        lines,
    )
}

/// 通知メールを組み立てる
pub fn compose(event: &OrderEvent, to: &str, from: &str) -> EmailMessage {
    EmailMessage {
        to:        to.to_string(),
        from:      from.to_string(),
        subject:   subject_for(
            event.order_status.as_ref().and_then(StatusValue::as_text),
            &event.id,
        ),
        text_body: body_for(event),
    }
}

fn line_for(line: &OrderLine) -> String {
    format!(
        "{}x {} @ ${} each = ${}",
        line.quantity, line.item_name, line.unit_price, line.line_total
    )
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(PLACEHOLDER)
}
