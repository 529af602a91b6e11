//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `car`: 車両の作成・取得・削除

pub mod car;
pub mod health;

pub use car::{CarState, create_car, delete_car, get_car, method_not_allowed};
pub use health::health_check;
