//! # ミドルウェア
//!
//! Cars API 用のミドルウェアを提供する。

pub mod auth;

pub use auth::{AuthState, CARS_ID_HEADER, require_cars_token};
