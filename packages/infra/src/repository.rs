//! # リポジトリ実装
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ハンドラはトレイトにのみ依存し、具体実装は起動時に注入する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod car_repository;

pub use car_repository::{CarRepository, PostgresCarRepository};
