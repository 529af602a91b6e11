//! # ヘルスチェックハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health
//! ```
//!
//! `X-CARS-ID` による認証は不要。
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "OK"
//! }
//! ```

use axum::Json;
use cars_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// サーバーが正常に稼働していることを確認するためのエンドポイント。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
