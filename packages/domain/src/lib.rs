//! # Cars API ドメイン層
//!
//! 車両（Car）エンティティと、その生成時のビジネスルールを定義する。
//!
//! ## 設計方針
//!
//! - **外部依存の排除**: データベースや HTTP に依存しない純粋なドメインモデル
//! - **生成時検証**: 検証済みの値しか [`car::NewCar`] として存在できない
//! - **Newtype による ID**: [`car::CarId`] で UUID の取り違えを防ぐ
//!
//! ## モジュール構成
//!
//! - [`car`] - 車両エンティティと ID
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use cars_domain::car::{Car, CarId, NewCar};
//!
//! let new_car = NewCar::new("Toyota", "Camry", "green", 2005).unwrap();
//! let car = Car::new(CarId::new(), new_car);
//! assert_eq!(car.make(), "Toyota");
//! ```

pub mod car;
pub mod error;

pub use error::DomainError;
