//! # 車両ハンドラ
//!
//! `/cars` のメソッドごとのハンドラを提供する。
//! `X-CARS-ID` の検証はルーター側のミドルウェアで済んでいる前提。
//!
//! ## エンドポイント
//!
//! - `POST /cars` - 車両作成
//! - `GET /cars?car_id={id}` - 車両取得
//! - `DELETE /cars?car_id={id}` - 車両削除
//! - 上記以外のメソッド - 405

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use cars_domain::car::{Car, CarId, NewCar};
use cars_infra::repository::CarRepository;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CarsError;

/// 成功レスポンスの Content-Type
const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// 車両ハンドラの共有状態
pub struct CarState {
    pub car_repository: Arc<dyn CarRepository>,
}

// --- リクエスト/レスポンス型 ---

/// 車両作成リクエスト
///
/// 欠落と `null` を区別せず、どちらも未入力として検証に回す。
#[derive(Debug, Deserialize)]
pub struct CreateCarRequest {
    pub make:  Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub year:  Option<i32>,
}

/// クエリパラメータ（出現順の key-value 列）
///
/// 同じキーが複数回現れてもエラーにせず、最初の値を採用する。
pub type QueryPairs = Query<Vec<(String, String)>>;

/// 車両レスポンス
#[derive(Debug, Serialize)]
pub struct CarDto {
    pub id:    String,
    pub model: String,
    pub make:  String,
    pub color: String,
    pub year:  i32,
}

impl From<&Car> for CarDto {
    fn from(car: &Car) -> Self {
        Self {
            id:    car.id().to_string(),
            model: car.model().to_string(),
            make:  car.make().to_string(),
            color: car.color().to_string(),
            year:  car.year(),
        }
    }
}

// --- ハンドラ ---

/// POST /cars
///
/// 検証順は make → model → color → year。ID はサーバーで採番する。
#[tracing::instrument(skip_all)]
pub async fn create_car(
    State(state): State<Arc<CarState>>,
    body: Bytes,
) -> Result<Response, CarsError> {
    let req: CreateCarRequest =
        serde_json::from_slice(&body).map_err(|e| CarsError::Decode(e.to_string()))?;

    let new_car = NewCar::new(
        req.make.unwrap_or_default(),
        req.model.unwrap_or_default(),
        req.color.unwrap_or_default(),
        req.year.unwrap_or_default(),
    )?;
    let car = Car::new(CarId::new(), new_car);

    let id = state.car_repository.insert(&car).await?;
    tracing::info!(car_id = %id, "車両を登録しました");

    json_response(&CarDto {
        id: id.to_string(),
        ..CarDto::from(&car)
    })
}

/// GET /cars?car_id={id}
#[tracing::instrument(skip_all)]
pub async fn get_car(
    State(state): State<Arc<CarState>>,
    query: Result<QueryPairs, QueryRejection>,
) -> Result<Response, CarsError> {
    let id = parse_car_id(query)?;

    let car = state
        .car_repository
        .find_by_id(&id)
        .await?
        .ok_or(CarsError::NotFound(id))?;

    json_response(&CarDto::from(&car))
}

/// DELETE /cars?car_id={id}
///
/// 存在しない ID でも 200 を返す。ボディは空。
#[tracing::instrument(skip_all)]
pub async fn delete_car(
    State(state): State<Arc<CarState>>,
    query: Result<QueryPairs, QueryRejection>,
) -> Result<Response, CarsError> {
    let id = parse_car_id(query)?;

    state.car_repository.delete(&id).await?;
    tracing::info!(car_id = %id, "車両を削除しました");

    Ok((StatusCode::OK, [json_content_type()]).into_response())
}

/// GET / POST / DELETE 以外のメソッド
pub async fn method_not_allowed(method: Method) -> CarsError {
    CarsError::MethodNotAllowed(method.to_string())
}

// --- ヘルパー ---

fn parse_car_id(query: Result<QueryPairs, QueryRejection>) -> Result<CarId, CarsError> {
    let Query(pairs) = query.map_err(|e| CarsError::BadRequest(e.body_text()))?;

    let raw = pairs
        .into_iter()
        .find_map(|(key, value)| (key == "car_id").then_some(value))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CarsError::BadRequest("car_id は必須です".to_string()))?;

    let uuid = Uuid::parse_str(&raw)
        .map_err(|_| CarsError::BadRequest(format!("car_id の形式が不正です: {raw}")))?;

    Ok(CarId::from_uuid(uuid))
}

fn json_response<T: Serialize>(value: &T) -> Result<Response, CarsError> {
    let body = serde_json::to_vec(value).map_err(|e| CarsError::Encode(e.to_string()))?;
    Ok(([json_content_type()], body).into_response())
}

fn json_content_type() -> (header::HeaderName, HeaderValue) {
    (
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    )
}
