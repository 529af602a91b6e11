//! # 車両エンティティ
//!
//! API が扱う唯一のリソース。
//!
//! ## ライフサイクル
//!
//! ```text
//! POST   → NewCar::new（検証）→ Car::new（ID 採番）→ 永続化
//! GET    → 永続化層から Car::from_db で復元
//! DELETE → 永続化層から削除
//! ```
//!
//! 更新操作は存在しない。ID は生成後に変更されない。

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// 文字列フィールドの最大文字数（`cars` テーブルのカラム幅）
pub const MAX_FIELD_LENGTH: usize = 128;

/// 車両 ID
///
/// サーバー側で UUID v7 を採番する。クライアントが指定することはできない。
/// JSON や Display では UUID のハイフン区切り文字列になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct CarId(Uuid);

impl CarId {
    /// 新しい ID を採番する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 永続化済みの UUID から復元する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CarId {
    fn default() -> Self {
        Self::new()
    }
}

/// 検証済みの車両作成内容
///
/// [`NewCar::new`] を通らない限り構築できないため、
/// このインスタンスが存在すること自体が必須項目の充足を保証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    make:  String,
    model: String,
    color: String,
    year:  i32,
}

impl NewCar {
    /// 作成内容を検証する
    ///
    /// make → model → color → year の順に検証し、最初に違反したフィールドで
    /// エラーを返す（すべての違反を集約はしない）。
    ///
    /// # エラー
    ///
    /// - 文字列フィールドが空、または [`MAX_FIELD_LENGTH`] 文字を超える
    /// - `year` が 0
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
        year: i32,
    ) -> Result<Self, DomainError> {
        let make = validate_text("make", make.into())?;
        let model = validate_text("model", model.into())?;
        let color = validate_text("color", color.into())?;
        if year == 0 {
            return Err(DomainError::Validation("year は必須です".to_string()));
        }

        Ok(Self {
            make,
            model,
            color,
            year,
        })
    }
}

fn validate_text(field: &str, value: String) -> Result<String, DomainError> {
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{field} は必須です")));
    }
    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(DomainError::Validation(format!(
            "{field} は {MAX_FIELD_LENGTH} 文字以内である必要があります"
        )));
    }
    Ok(value)
}

/// 車両
///
/// リポジトリから返される値は永続化層の行表現から切り離された所有値である。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    id:    CarId,
    make:  String,
    model: String,
    color: String,
    year:  i32,
}

impl Car {
    /// 採番済み ID と検証済み作成内容から車両を作成する
    pub fn new(id: CarId, new_car: NewCar) -> Self {
        let NewCar {
            make,
            model,
            color,
            year,
        } = new_car;
        Self {
            id,
            make,
            model,
            color,
            year,
        }
    }

    /// データベースから復元する
    ///
    /// 永続化済みの値は作成時に検証されているため、再検証しない。
    pub fn from_db(id: CarId, make: String, model: String, color: String, year: i32) -> Self {
        Self {
            id,
            make,
            model,
            color,
            year,
        }
    }

    pub fn id(&self) -> &CarId {
        &self.id
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}
