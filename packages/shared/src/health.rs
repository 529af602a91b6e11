//! # ヘルスチェック共通型
//!
//! ヘルスチェックエンドポイント（`GET /health`）のレスポンス型を提供する。

use serde::{Deserialize, Serialize};

/// 稼働中を表すステータス文字列
pub const HEALTH_STATUS_OK: &str = "OK";

/// ヘルスチェックレスポンス
///
/// 既存クライアントとの互換性のため、ボディは `{"status":"OK"}` 固定とする。
///
/// ## 使用例
///
/// ```
/// use cars_shared::HealthResponse;
///
/// let response = HealthResponse::ok();
/// assert_eq!(response.status, "OK");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態
    pub status: String,
}

impl HealthResponse {
    /// 稼働中のレスポンスを作成する
    pub fn ok() -> Self {
        Self {
            status: HEALTH_STATUS_OK.to_string(),
        }
    }
}
