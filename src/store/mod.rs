//! 存储层
//!
//! 生产环境使用 PostgreSQL 连接池，测试使用内存实现。

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Word;

pub use postgres::PgWordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait WordStore: Send + Sync {
    /// 按 created_at 倒序返回全部记录
    async fn list_words(&self) -> Result<Vec<Word>, StoreError>;

    /// 插入一条记录，id 与时间戳由存储分配
    async fn insert_word(&self, word: &str) -> Result<Word, StoreError>;
}
