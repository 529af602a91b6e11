//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use cars_domain::car::{Car, CarId, NewCar};

/// テスト用の車両を作成する
pub fn build_car(make: &str, model: &str, color: &str, year: i32) -> Car {
    Car::new(
        CarId::new(),
        NewCar::new(make, model, color, year).unwrap(),
    )
}

/// 標準的なテスト用車両
pub fn camry() -> Car {
    build_car("Toyota", "Camry", "green", 2005)
}
