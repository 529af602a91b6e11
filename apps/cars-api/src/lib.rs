//! # Cars API ライブラリ
//!
//! 車両リソースの作成・取得・削除を提供する HTTP サーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State の組み立てとルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラー種別と HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（`X-CARS-ID` 検証）

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
