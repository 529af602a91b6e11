//! # Cars API 共有ユーティリティ
//!
//! このクレートは、Cars API のすべてのクレートから使用される
//! 共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（HTTP レスポンスへの変換は各アプリの責務）

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
