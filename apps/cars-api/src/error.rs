//! # Cars API エラー定義
//!
//! `/cars` の処理中に発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## 設計方針
//!
//! - **種別 → ステータスの一対一対応**: ステータスコードは [`CarsError`] の
//!   バリアントだけで決まる
//! - **内部情報の秘匿**: データベースエラーの詳細はログにのみ出力し、
//!   レスポンスには固定メッセージを返す
//! - **共通ボディ**: すべてのエラーを [`ErrorResponse`] の形式で返す

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use cars_domain::{DomainError, car::CarId};
use cars_infra::InfraError;
use cars_shared::ErrorResponse;
use thiserror::Error;

/// `/cars` が受け付けるメソッド（`Allow` ヘッダーの値）
pub const ALLOWED_METHODS: &str = "GET, POST, DELETE";

/// Cars API で発生するエラー
#[derive(Debug, Error)]
pub enum CarsError {
    /// `X-CARS-ID` ヘッダーが欠落している、または一致しない
    #[error("認証に失敗しました")]
    Unauthorized,

    /// リクエストボディを JSON として解釈できない
    #[error("リクエストボディを解析できません: {0}")]
    Decode(String),

    /// 必須項目の欠落など
    #[error("{0}")]
    Validation(String),

    /// クエリパラメータの欠落・形式不正
    #[error("{0}")]
    BadRequest(String),

    /// 車両が存在しない
    #[error("車両が見つかりません: {0}")]
    NotFound(CarId),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Storage(#[from] InfraError),

    /// レスポンスボディのシリアライズ失敗
    #[error("レスポンスを生成できません: {0}")]
    Encode(String),

    /// `/cars` が扱わないメソッド
    #[error("{0} メソッドは許可されていません")]
    MethodNotAllowed(String),
}

impl From<DomainError> for CarsError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl CarsError {
    /// ステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Decode(_) | Self::BadRequest(_) | Self::Encode(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self {
            Self::Unauthorized => ErrorResponse::unauthorized(self.to_string()),
            Self::Decode(_) | Self::BadRequest(_) => ErrorResponse::bad_request(self.to_string()),
            Self::Validation(_) => ErrorResponse::unprocessable_entity(self.to_string()),
            Self::NotFound(_) => ErrorResponse::not_found(self.to_string()),
            Self::Storage(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                ErrorResponse::internal_error()
            }
            Self::Encode(msg) => {
                tracing::error!(error = %msg, "レスポンスのシリアライズに失敗しました");
                ErrorResponse::bad_request("レスポンスを生成できません")
            }
            Self::MethodNotAllowed(_) => ErrorResponse::method_not_allowed(self.to_string()),
        }
    }
}

impl IntoResponse for CarsError {
    fn into_response(self) -> Response {
        let mut response = (self.status_code(), Json(self.to_error_response())).into_response();
        if matches!(self, Self::MethodNotAllowed(_)) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}
