//! # 冪等性ストア
//!
//! 通知済みの状態遷移フィンガープリントを保持し、同じ遷移への重複通知を防ぐ。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `IdempotencyStore` trait でバックエンドを差し替え可能にする
//! - **追記のみ**: 削除・有効期限はない。プロセスの寿命が重複抑止の範囲
//! - **判定と記録は 1 ステップ**: [`IdempotencyStore::admit`] は確認と記録を
//!   同じロック内で行い、ほぼ同時に届いた同一遷移の両方が通過することを防ぐ

use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

use orderbell_domain::order::TransitionFingerprint;

/// 冪等性ストアトレイト
///
/// 判定と記録の間に中断点を作らないため、同期メソッドとして定義する。
pub trait IdempotencyStore: Send + Sync {
    /// 通知済みかどうか
    fn has_seen(&self, fingerprint: &TransitionFingerprint) -> bool;

    /// 通知済みとして記録する
    fn mark_seen(&self, fingerprint: TransitionFingerprint);

    /// 未通知なら記録して `true` を返す。通知済みなら何もせず `false`。
    ///
    /// 確認と記録を不可分に行う。受付パイプラインはこのメソッドだけを使う。
    fn admit(&self, fingerprint: TransitionFingerprint) -> bool;
}

/// インメモリ冪等性ストア
///
/// プロセス起動時は空で、単調に増えるだけ。永続化はせず、再起動で失われる。
#[derive(Debug, Default)]
pub struct InMemoryIdempotencyStore {
    seen: Mutex<HashSet<TransitionFingerprint>>,
}

impl InMemoryIdempotencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録済みフィンガープリント数
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // 挿入途中で panic しても集合は壊れないため、poison は無視して中身を使う
    fn lock(&self) -> MutexGuard<'_, HashSet<TransitionFingerprint>> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdempotencyStore for InMemoryIdempotencyStore {
    fn has_seen(&self, fingerprint: &TransitionFingerprint) -> bool {
        self.lock().contains(fingerprint)
    }

    fn mark_seen(&self, fingerprint: TransitionFingerprint) {
        self.lock().insert(fingerprint);
    }

    fn admit(&self, fingerprint: TransitionFingerprint) -> bool {
        self.lock().insert(fingerprint)
    }
}
