//! # Cars API ルーターのテスト
//!
//! `build_app` が構築する実際のルーター（認証・Request ID レイヤー込み）に
//! インメモリのモックリポジトリを注入して検証する。

use std::sync::Arc;

use axum::{Router, body::Body};
use cars_api::app_builder::build_app;
use cars_infra::mock::MockCarRepository;
use http::{Method, Request, StatusCode, header};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

const TOKEN: &str = "test-cars-token";

// =============================================================================
// ヘルパー
// =============================================================================

fn test_app(repository: MockCarRepository) -> Router {
    build_app(Arc::new(repository), TOKEN)
}

fn authorized(method: Method, uri: &str) -> http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-cars-id", TOKEN)
}

fn post_car(body: impl Into<Body>) -> Request<Body> {
    authorized(Method::POST, "/cars")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn camry_json() -> Value {
    json!({
        "make": "Toyota",
        "model": "Camry",
        "color": "green",
        "year": 2005
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

async fn create(app: &Router, body: &Value) -> Value {
    let (status, _, body) = send(app, post_car(body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    json_body(&body)
}

// =============================================================================
// POST /cars
// =============================================================================

#[tokio::test]
async fn test_post_有効な車両を作成すると200とボディを返す() {
    let app = test_app(MockCarRepository::new());

    let (status, headers, body) = send(&app, post_car(camry_json().to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/json; charset=UTF-8"
    );
    let json = json_body(&body);
    assert_eq!(json["make"], "Toyota");
    assert_eq!(json["model"], "Camry");
    assert_eq!(json["color"], "green");
    assert_eq!(json["year"], 2005);
    assert!(!json["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_作成ごとに異なるidが採番される() {
    let repository = MockCarRepository::new();
    let app = test_app(repository.clone());

    let first = create(&app, &camry_json()).await;
    let second = create(&app, &camry_json()).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(repository.len(), 2);
}

#[rstest]
#[case::make欠落(json!({"model": "Camry", "color": "green", "year": 2005}), "make は必須です")]
#[case::model欠落(json!({"make": "Toyota", "color": "green", "year": 2005}), "model は必須です")]
#[case::color欠落(json!({"make": "Toyota", "model": "Camry", "year": 2005}), "color は必須です")]
#[case::year欠落(json!({"make": "Toyota", "model": "Camry", "color": "green"}), "year は必須です")]
#[case::makeが空文字(json!({"make": "", "model": "Camry", "color": "green", "year": 2005}), "make は必須です")]
#[case::yearが0(json!({"make": "Toyota", "model": "Camry", "color": "green", "year": 0}), "year は必須です")]
#[case::makeがnull(json!({"make": null, "model": "Camry", "color": "green", "year": 2005}), "make は必須です")]
#[case::全項目欠落は最初のフィールドを報告(json!({}), "make は必須です")]
#[tokio::test]
async fn test_post_必須項目の欠落は422(#[case] body: Value, #[case] message: &str) {
    let repository = MockCarRepository::new();
    let app = test_app(repository.clone());

    let (status, _, body) = send(&app, post_car(body.to_string())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(&body),
        json!({
            "status": "422",
            "code": "422",
            "message": message,
            "title": "Unprocessable Entity"
        })
    );
    assert!(repository.is_empty());
}

#[rstest]
#[case::空ボディ("")]
#[case::構文エラー("{\"make\": ")]
#[case::jsonでない("make=Toyota")]
#[case::型不一致(r#"{"make": "Toyota", "model": "Camry", "color": "green", "year": "2005"}"#)]
#[tokio::test]
async fn test_post_解析できないボディは400(#[case] body: &'static str) {
    let app = test_app(MockCarRepository::new());

    let (status, _, body) = send(&app, post_car(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = json_body(&body);
    assert_eq!(json["status"], "400");
    assert_eq!(json["code"], "400");
    assert_eq!(json["title"], "Bad Request");
}

#[tokio::test]
async fn test_post_データベースエラーは500で詳細を返さない() {
    let app = test_app(MockCarRepository::failing());

    let (status, _, body) = send(&app, post_car(camry_json().to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(&body),
        json!({
            "status": "500",
            "code": "500",
            "message": "内部エラーが発生しました",
            "title": "Internal Server Error"
        })
    );
}

// =============================================================================
// 認証
// =============================================================================

#[rstest]
#[case::post(Method::POST)]
#[case::get(Method::GET)]
#[case::delete(Method::DELETE)]
#[case::put(Method::PUT)]
#[case::patch(Method::PATCH)]
#[case::options(Method::OPTIONS)]
#[tokio::test]
async fn test_x_cars_idがなければ401(#[case] method: Method) {
    let app = test_app(MockCarRepository::new());
    let request = Request::builder()
        .method(method)
        .uri("/cars")
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let json = json_body(&body);
    assert_eq!(json["status"], "401");
    assert_eq!(json["title"], "Unauthorized");
}

// HEAD はボディが除去されるためステータスのみ確認する
#[tokio::test]
async fn test_headでもx_cars_idがなければ405より先に401() {
    let app = test_app(MockCarRepository::new());
    let request = Request::builder()
        .method(Method::HEAD)
        .uri("/cars")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.get(header::ALLOW).is_none());
}

#[tokio::test]
async fn test_x_cars_idが不一致なら処理前に401() {
    let repository = MockCarRepository::new();
    let app = test_app(repository.clone());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/cars")
        .header("x-cars-id", "wrong-token")
        .body(Body::from(camry_json().to_string()))
        .unwrap();

    let (status, _, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_不正なボディでも認証が先に評価される() {
    let app = test_app(MockCarRepository::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/cars")
        .body(Body::from("{"))
        .unwrap();

    let (status, _, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// GET / DELETE /cars
// =============================================================================

#[rstest]
#[case::get_未指定(Method::GET, "/cars")]
#[case::get_空文字(Method::GET, "/cars?car_id=")]
#[case::get_uuidでない(Method::GET, "/cars?car_id=abc")]
#[case::delete_未指定(Method::DELETE, "/cars")]
#[case::delete_空文字(Method::DELETE, "/cars?car_id=")]
#[case::delete_uuidでない(Method::DELETE, "/cars?car_id=abc")]
#[tokio::test]
async fn test_car_idが不正なら400(#[case] method: Method, #[case] uri: &str) {
    let app = test_app(MockCarRepository::new());

    let (status, _, body) = send(&app, authorized(method, uri).body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["status"], "400");
}

#[tokio::test]
async fn test_get_存在しないidは404() {
    let app = test_app(MockCarRepository::new());
    let uri = format!("/cars?car_id={}", uuid::Uuid::now_v7());

    let (status, _, body) = send(&app, authorized(Method::GET, &uri).body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json = json_body(&body);
    assert_eq!(json["status"], "404");
    assert_eq!(json["title"], "Not Found");
}

#[tokio::test]
async fn test_delete_存在しないidでも200() {
    let app = test_app(MockCarRepository::new());
    let uri = format!("/cars?car_id={}", uuid::Uuid::now_v7());

    let (status, headers, body) = send(
        &app,
        authorized(Method::DELETE, &uri).body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/json; charset=UTF-8"
    );
}

#[tokio::test]
async fn test_get_car_idが重複していれば最初の値を使う() {
    let app = test_app(MockCarRepository::new());
    let created = create(&app, &camry_json()).await;
    let uri = format!(
        "/cars?car_id={}&car_id=not-a-uuid",
        created["id"].as_str().unwrap()
    );

    let (status, _, body) = send(&app, authorized(Method::GET, &uri).body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), created);
}

#[tokio::test]
async fn test_get_データベースエラーは500() {
    let app = test_app(MockCarRepository::failing());
    let uri = format!("/cars?car_id={}", uuid::Uuid::now_v7());

    let (status, _, body) = send(&app, authorized(Method::GET, &uri).body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body)["message"], "内部エラーが発生しました");
}

#[tokio::test]
async fn test_作成した車両を取得し削除後は取得できない() {
    let app = test_app(MockCarRepository::new());
    let created = create(&app, &camry_json()).await;
    let uri = format!("/cars?car_id={}", created["id"].as_str().unwrap());

    // 取得
    let (status, headers, body) =
        send(&app, authorized(Method::GET, &uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/json; charset=UTF-8"
    );
    assert_eq!(json_body(&body), created);

    // 削除
    let (status, _, _) = send(
        &app,
        authorized(Method::DELETE, &uri).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 再取得
    let (status, _, _) = send(&app, authorized(Method::GET, &uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// 未対応メソッド
// =============================================================================

#[rstest]
#[case::put(Method::PUT)]
#[case::patch(Method::PATCH)]
#[case::head(Method::HEAD)]
#[case::options(Method::OPTIONS)]
#[tokio::test]
async fn test_未対応メソッドは405(#[case] method: Method) {
    let app = test_app(MockCarRepository::new());

    let (status, headers, _) =
        send(&app, authorized(method, "/cars").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers.get(header::ALLOW).unwrap(), "GET, POST, DELETE");
}

#[tokio::test]
async fn test_405のボディは共通エラー形式() {
    let app = test_app(MockCarRepository::new());

    let (_, _, body) = send(
        &app,
        authorized(Method::PUT, "/cars").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(
        json_body(&body),
        json!({
            "status": "405",
            "code": "405",
            "message": "PUT メソッドは許可されていません",
            "title": "Method Not Allowed"
        })
    );
}

// =============================================================================
// /health と Request ID
// =============================================================================

#[tokio::test]
async fn test_healthは認証なしで200() {
    let app = test_app(MockCarRepository::new());
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"status": "OK"}));
}

#[tokio::test]
async fn test_レスポンスにx_request_idヘッダーが含まれる() {
    let app = test_app(MockCarRepository::new());

    let (_, headers, _) = send(
        &app,
        authorized(Method::GET, "/cars").body(Body::empty()).unwrap(),
    )
    .await;

    let request_id = headers.get("x-request-id").unwrap().to_str().unwrap();
    let uuid = uuid::Uuid::parse_str(request_id)
        .unwrap_or_else(|_| panic!("有効な UUID であること: {request_id}"));
    assert_eq!(uuid.get_version_num(), 7);
}

#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される() {
    let app = test_app(MockCarRepository::new());
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "client-provided-request-id-123")
        .body(Body::empty())
        .unwrap();

    let (_, headers, _) = send(&app, request).await;

    assert_eq!(
        headers.get("x-request-id").unwrap(),
        "client-provided-request-id-123"
    );
}

// =============================================================================
// 末尾スラッシュ
// =============================================================================

#[tokio::test]
async fn test_末尾スラッシュ付きのcarsでも作成できる() {
    let app = test_app(MockCarRepository::new());
    let request = authorized(Method::POST, "/cars/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(camry_json().to_string()))
        .unwrap();

    let (status, _, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["make"], "Toyota");
}

#[tokio::test]
async fn test_末尾スラッシュ付きのcarsでも認証が先に評価される() {
    let app = test_app(MockCarRepository::new());
    let request = Request::builder()
        .uri("/cars/?car_id=x")
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(&body)["status"], "401");
}

#[tokio::test]
async fn test_末尾スラッシュ付きのcarsでも未対応メソッドは405() {
    let app = test_app(MockCarRepository::new());

    let (status, headers, _) = send(
        &app,
        authorized(Method::PUT, "/cars/").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers.get(header::ALLOW).unwrap(), "GET, POST, DELETE");
}

#[tokio::test]
async fn test_末尾スラッシュ付きのhealthも200() {
    let app = test_app(MockCarRepository::new());
    let request = Request::builder()
        .uri("/health/")
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"status": "OK"}));
}
