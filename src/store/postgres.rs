use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{StoreError, WordStore};
use crate::config::Config;
use crate::models::Word;

/// 基于 PgPool 的存储，连接池随进程存活，每次查询按需借出连接
#[derive(Clone)]
pub struct PgWordStore {
    pool: PgPool,
}

impl PgWordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool_options(config: &Config) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
    }

    /// 创建连接池但不立即连接，首次查询时才建立连接。
    /// 数据库暂时不可用时服务照常监听，请求返回 500。
    pub fn connect_lazy(config: &Config) -> Self {
        tracing::info!(
            host = %config.db_host,
            database = %config.db_name,
            max_connections = config.max_connections,
            "Creating PostgreSQL connection pool"
        );
        let pool = Self::pool_options(config).connect_lazy_with(config.connect_options());
        Self::new(pool)
    }
}

#[async_trait]
impl WordStore for PgWordStore {
    async fn list_words(&self) -> Result<Vec<Word>, StoreError> {
        let words = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, word, created_at
            FROM words
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    async fn insert_word(&self, word: &str) -> Result<Word, StoreError> {
        let id: i32 = sqlx::query_scalar("INSERT INTO words (word) VALUES ($1) RETURNING id")
            .bind(word)
            .fetch_one(&self.pool)
            .await?;

        Ok(Word {
            id,
            word: word.to_string(),
            created_at: None,
        })
    }
}
