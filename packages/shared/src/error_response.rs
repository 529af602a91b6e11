//! # エラーレスポンス
//!
//! すべての非 2xx レスポンスで共通のエラーボディを提供する。
//!
//! ## 形式
//!
//! ```json
//! {
//!   "status": "422",
//!   "code": "422",
//!   "message": "make は必須です",
//!   "title": "Unprocessable Entity"
//! }
//! ```
//!
//! `status` と `code` はどちらもステータスコードの 10 進文字列で、同じ値になる。
//! 既存クライアントとの互換性のため両方を残している。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はアプリ側の責務（shared に axum 依存を入れない）
//! - よく使うステータスは便利コンストラクタで提供し、title のハードコードを排除

use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// ステータスコード（10 進文字列）
    pub status:  String,
    /// ステータスコード（10 進文字列、`status` と同値）
    pub code:    String,
    /// エラーの詳細。空の場合は `title` が入る
    pub message: String,
    /// ステータスの概要（reason phrase）
    pub title:   String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// `message` が空文字列の場合は `title` をメッセージとして使用する。
    pub fn new(status: u16, title: impl Into<String>, message: impl Into<String>) -> Self {
        let title = title.into();
        let mut message = message.into();
        if message.is_empty() {
            message.clone_from(&title);
        }

        Self {
            status: status.to_string(),
            code: status.to_string(),
            message,
            title,
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized", message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "Not Found", message)
    }

    /// 405 Method Not Allowed
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(405, "Method Not Allowed", message)
    }

    /// 422 Unprocessable Entity
    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::new(422, "Unprocessable Entity", message)
    }

    /// 500 Internal Server Error
    ///
    /// message は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error", "内部エラーが発生しました")
    }
}
