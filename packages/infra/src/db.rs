//! # PostgreSQL データベース接続管理
//!
//! データベース接続プールの作成とマイグレーションを行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 毎回接続を張り直すオーバーヘッドを避け、接続を再利用
//! - **スコープ付き取得**: クエリ実行時にプールから接続を借り、
//!   完了時（成功・失敗を問わず）にドロップでプールへ返却する
//! - **接続記述子**: URL 文字列ではなく [`PgConnectOptions`] を受け取り、
//!   パスワードのエスケープ漏れを防ぐ
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use cars_infra::db;
//! use sqlx::postgres::PgConnectOptions;
//!
//! let options = PgConnectOptions::new()
//!     .host("localhost")
//!     .database("cars")
//!     .username("postgres")
//!     .password("password");
//! let pool = db::create_pool(options).await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::error::InfraError;

/// 最大接続数
const MAX_CONNECTIONS: u32 = 10;

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// PostgreSQL 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを
/// リポジトリに渡して共有する。最初の接続確立に失敗した場合はエラーを返す。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, InfraError> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// データベースマイグレーションを実行する
///
/// `sqlx::migrate!()` マクロで埋め込まれたマイグレーションファイルを
/// 順番に適用する。適用済みのマイグレーションはスキップされる。
///
/// sqlx が PostgreSQL の advisory lock を使用するため、
/// 複数プロセスから同時に呼び出しても安全。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
