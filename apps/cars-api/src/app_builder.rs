//! # Cars API アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use cars_infra::repository::CarRepository;
use cars_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{CarState, create_car, delete_car, get_car, health_check, method_not_allowed},
    middleware::{AuthState, require_cars_token},
};

/// ルーターを構築する
///
/// リポジトリと共有シークレットを受け取り、State → Router の順に組み立てる。
pub fn build_app(car_repository: Arc<dyn CarRepository>, auth_token: &str) -> Router {
    let car_state = Arc::new(CarState { car_repository });
    let auth_state = AuthState::new(auth_token);

    // axum の get は HEAD にも応答するため、HEAD を明示的に 405 へ振り分ける
    let cars_routes = post(create_car)
        .get(get_car)
        .delete(delete_car)
        .head(method_not_allowed)
        .fallback(method_not_allowed);

    // 末尾スラッシュ付きのパスも同じルートとして扱う
    let cars = Router::new()
        .route("/cars", cars_routes.clone())
        .route("/cars/", cars_routes)
        // メソッドの振り分けより先に X-CARS-ID を検証する
        .route_layer(from_fn_with_state(auth_state, require_cars_token))
        .with_state(car_state);

    // レイヤーは下から順に適用される:
    // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
    // 2. TraceLayer: request_id を含むリクエストスパンを作成
    // 3. PropagateRequestIdLayer: レスポンスヘッダーに x-request-id をコピー
    Router::new()
        .route("/health", get(health_check))
        .route("/health/", get(health_check))
        .merge(cars)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
