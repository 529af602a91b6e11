//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 422 Unprocessable Entity | 作成ペイロードの必須項目不足 |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// メッセージは最初に違反したフィールド名を含む。
    /// クライアント自身の入力についての説明なので、そのままレスポンスに載せてよい。
    #[error("{0}")]
    Validation(String),
}
