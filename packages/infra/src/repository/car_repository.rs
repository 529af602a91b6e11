//! # CarRepository
//!
//! 車両の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **行表現の隠蔽**: `cars` テーブルの行は [`CarRow`] として受け取り、
//!   呼び出し側にはドメインの [`Car`] だけを返す
//! - **スコープ付き取得**: 各メソッドは `&PgPool` を executor として渡し、
//!   ステートメントの実行中だけ接続を借りる
//! - **冪等な削除**: 存在しない ID の削除はエラーにしない

use async_trait::async_trait;
use cars_domain::car::{Car, CarId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 車両リポジトリトレイト
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// 車両を挿入し、データベースが返した ID を返す
    async fn insert(&self, car: &Car) -> Result<CarId, InfraError>;

    /// 車両を削除する
    ///
    /// 該当行がなくても成功する。
    async fn delete(&self, id: &CarId) -> Result<(), InfraError>;

    /// ID で車両を検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(car))`: 車両が見つかった場合
    /// - `Ok(None)`: 車両が見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, InfraError>;
}

/// DB の cars テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct CarRow {
    id:    Uuid,
    model: String,
    make:  String,
    color: String,
    year:  i32,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car::from_db(
            CarId::from_uuid(row.id),
            row.make,
            row.model,
            row.color,
            row.year,
        )
    }
}

/// PostgreSQL 実装の CarRepository
#[derive(Debug, Clone)]
pub struct PostgresCarRepository {
    pool: PgPool,
}

impl PostgresCarRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarRepository for PostgresCarRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(car_id = %car.id()))]
    async fn insert(&self, car: &Car) -> Result<CarId, InfraError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO cars (id, model, make, color, year)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(car.id().as_uuid())
        .bind(car.model())
        .bind(car.make())
        .bind(car.color())
        .bind(car.year())
        .fetch_one(&self.pool)
        .await?;

        Ok(CarId::from_uuid(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(car_id = %id))]
    async fn delete(&self, id: &CarId) -> Result<(), InfraError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        tracing::debug!(rows_affected = result.rows_affected(), "車両を削除しました");
        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(car_id = %id))]
    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, InfraError> {
        let row: Option<CarRow> = sqlx::query_as(
            r#"
            SELECT id, model, make, color, year
            FROM cars
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Car::from))
    }
}
