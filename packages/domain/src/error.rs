//! # ドメイン層エラー定義
//!
//! ドメインモデルの不変条件違反を表現するエラー型。
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、HTTP レスポンスに変換する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須フィールドの未入力など、入力値が不変条件を満たさない場合に使用する。
    /// メッセージはそのままクライアントに返される。
    #[error("{0}")]
    Validation(String),
}
