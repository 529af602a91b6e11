//! # Cars API 設定
//!
//! 環境変数から Cars API サーバーの設定を読み込む。
//!
//! 読み込み処理は [`CarsConfig::from_vars`] に集約し、変数の参照元を
//! クロージャで差し替えられるようにしている。[`CarsConfig::from_env`] は
//! プロセス環境を参照する薄いラッパー。

use std::{env, fmt};

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定、または空
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値を解釈できない
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Cars API サーバーの設定
#[derive(Clone)]
pub struct CarsConfig {
    /// バインドアドレス
    pub host:       String,
    /// ポート番号
    pub port:       u16,
    /// `X-CARS-ID` ヘッダーに期待する共有シークレット
    pub auth_token: String,
    /// データベース接続設定
    pub database:   DatabaseConfig,
}

/// データベース接続設定
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host:     String,
    pub port:     u16,
    pub name:     String,
    pub user:     String,
    pub password: String,
}

impl CarsConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// 任意の変数ソースから設定を読み込む
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host:       var("CARS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:       port(&var, "CARS_PORT", DEFAULT_PORT)?,
            auth_token: required(&var, "CARS_AUTH_TOKEN")?,
            database:   DatabaseConfig {
                host:     required(&var, "POSTGRES_HOST")?,
                port:     port(&var, "POSTGRES_PORT", DEFAULT_POSTGRES_PORT)?,
                name:     required(&var, "POSTGRES_NAME")?,
                user:     required(&var, "POSTGRES_USER")?,
                password: required(&var, "POSTGRES_PASSWORD")?,
            },
        })
    }
}

impl DatabaseConfig {
    /// sqlx の接続記述子に変換する
    ///
    /// SSL は使用しない。
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
            .ssl_mode(PgSslMode::Disable)
    }
}

fn required(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match var(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn port(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u16,
) -> Result<u16, ConfigError> {
    match var(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

// シークレットをログに出さない
impl fmt::Debug for CarsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarsConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("auth_token", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
