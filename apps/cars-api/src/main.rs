//! # Cars API サーバー
//!
//! 車両リソースの作成・取得・削除を提供する HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CARS_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CARS_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `CARS_AUTH_TOKEN` | **Yes** | `X-CARS-ID` ヘッダーに期待する値 |
//! | `POSTGRES_HOST` | **Yes** | PostgreSQL ホスト |
//! | `POSTGRES_PORT` | No | PostgreSQL ポート（デフォルト: `5432`） |
//! | `POSTGRES_NAME` | **Yes** | データベース名 |
//! | `POSTGRES_USER` | **Yes** | ユーザー名 |
//! | `POSTGRES_PASSWORD` | **Yes** | パスワード |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p cars-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use cars_api::{app_builder::build_app, config::CarsConfig};
use cars_infra::{
    db,
    repository::{CarRepository, PostgresCarRepository},
};
use cars_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Cars API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("cars-api");
    init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "cars-api").entered();

    // 設定読み込み
    let config = CarsConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Cars API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(config.database.connect_options())
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let car_repository: Arc<dyn CarRepository> = Arc::new(PostgresCarRepository::new(pool));

    // ルーター構築
    let app = build_app(car_repository, &config.auth_token);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Cars API サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Cars API サーバーを停止しました");
    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラを登録できません: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラを登録できません: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("SIGINT を受信しました。シャットダウンします");
        }
        _ = terminate => {
            tracing::info!("SIGTERM を受信しました。シャットダウンします");
        }
    }
}
