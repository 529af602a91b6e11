//! # 共有シークレット検証ミドルウェア
//!
//! `/cars` へのすべてのリクエストで `X-CARS-ID` ヘッダーを検証する。
//!
//! ## 設計方針
//!
//! - メソッドの振り分けより前に実行する（未対応メソッドでも 401 が先）
//! - 比較は定数時間で行う
//! - 期待値は設定から注入し、コードに埋め込まない

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::error::CarsError;

/// 共有シークレットを運ぶヘッダー名
pub const CARS_ID_HEADER: &str = "x-cars-id";

/// 検証ミドルウェアの状態
#[derive(Clone)]
pub struct AuthState {
    expected_token: Arc<str>,
}

impl AuthState {
    pub fn new(expected_token: impl Into<Arc<str>>) -> Self {
        Self {
            expected_token: expected_token.into(),
        }
    }
}

/// 提示されたトークンが期待値と一致するか
pub fn verify_token(expected: &str, provided: Option<&str>) -> bool {
    provided.is_some_and(|provided| expected.as_bytes().ct_eq(provided.as_bytes()).into())
}

/// `X-CARS-ID` 検証ミドルウェア
pub async fn require_cars_token(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(CARS_ID_HEADER)
        .and_then(|v| v.to_str().ok());

    if !verify_token(&state.expected_token, provided) {
        tracing::warn!(
            method = %request.method(),
            header_present = provided.is_some(),
            "X-CARS-ID の検証に失敗しました"
        );
        return CarsError::Unauthorized.into_response();
    }

    next.run(request).await
}
