//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! cars-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use cars_domain::car::{Car, CarId};

use crate::{error::InfraError, repository::CarRepository};

// ===== MockCarRepository =====

#[derive(Clone, Default)]
pub struct MockCarRepository {
    cars:    Arc<Mutex<HashMap<CarId, Car>>>,
    failing: Arc<AtomicBool>,
}

impl MockCarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての操作がデータベースエラーで失敗するモックを作成する
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.failing.store(true, Ordering::SeqCst);
        mock
    }

    pub fn add_car(&self, car: Car) {
        self.cars.lock().unwrap().insert(*car.id(), car);
    }

    pub fn len(&self) -> usize {
        self.cars.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_failing(&self) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

#[async_trait]
impl CarRepository for MockCarRepository {
    async fn insert(&self, car: &Car) -> Result<CarId, InfraError> {
        self.check_failing()?;
        let mut cars = self.cars.lock().unwrap();
        if cars.contains_key(car.id()) {
            return Err(sqlx::Error::Protocol(format!(
                "車両 ID が重複しています: {}",
                car.id()
            ))
            .into());
        }
        cars.insert(*car.id(), car.clone());
        Ok(*car.id())
    }

    async fn delete(&self, id: &CarId) -> Result<(), InfraError> {
        self.check_failing()?;
        self.cars.lock().unwrap().remove(id);
        Ok(())
    }

    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, InfraError> {
        self.check_failing()?;
        Ok(self.cars.lock().unwrap().get(id).cloned())
    }
}
