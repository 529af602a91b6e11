//! # Cars インフラ層
//!
//! PostgreSQL との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトと、その PostgreSQL 実装を提供する。
//! 接続プールは呼び出し側が作成してリポジトリに注入するため、
//! このクレートがグローバルな接続状態を持つことはない。
//!
//! ## 依存関係
//!
//! ```text
//! cars-api → infra → domain
//!     ↘
//!       shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use cars_infra::{db, repository::PostgresCarRepository};
//!
//! let pool = db::create_pool(options).await?;
//! db::run_migrations(&pool).await?;
//! let repository = PostgresCarRepository::new(pool);
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::InfraError;
