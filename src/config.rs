//! 服务配置，全部来自环境变量（启动时先加载 `.env`）

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

pub const DEFAULT_SERVER_PORT: u16 = 5000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REQUEST_QUEUE_LIMIT: usize = 100;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: Option<u16>,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub server_port: u16,
    /// 连接池容量
    pub max_connections: u32,
    /// 等待空闲连接的最长时间，超时按存储故障处理
    pub acquire_timeout: Duration,
    /// 连接池占满后允许排队的请求数，超出直接 503
    pub request_queue_limit: usize,
}

impl Config {
    /// 加载 `.env` 后从进程环境读取
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 按给定的查找函数解析配置，便于测试时不碰进程环境
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            db_host: required("DB_HOST")?,
            db_port: parse_optional(&lookup, "DB_PORT")?,
            db_user: required("DB_USER")?,
            db_password: required("DB_PASSWORD")?,
            db_name: required("DB_NAME")?,
            server_port: parse_optional(&lookup, "SERVER_PORT")?.unwrap_or(DEFAULT_SERVER_PORT),
            max_connections: parse_optional(&lookup, "DB_MAX_CONNECTIONS")?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            acquire_timeout: Duration::from_secs(
                parse_optional(&lookup, "DB_ACQUIRE_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            ),
            request_queue_limit: parse_optional(&lookup, "REQUEST_QUEUE_LIMIT")?
                .unwrap_or(DEFAULT_REQUEST_QUEUE_LIMIT),
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.db_host)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name);

        match self.db_port {
            Some(port) => options.port(port),
            None => options,
        }
    }

    /// 同时在处理中的请求上限：连接池容量 + 排队上限
    pub fn max_in_flight(&self) -> usize {
        self.max_connections as usize + self.request_queue_limit
    }
}

fn parse_optional<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
