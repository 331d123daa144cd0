use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{StoreError, WordStore};
use crate::models::Word;

/// 测试用内存存储，可切换为故障状态模拟数据库不可用
#[derive(Default)]
pub struct MemoryWordStore {
    rows: Mutex<Vec<Word>>,
    failing: AtomicBool,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn row_count(&self) -> usize {
        self.rows.lock().await.len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl WordStore for MemoryWordStore {
    async fn list_words(&self) -> Result<Vec<Word>, StoreError> {
        self.check()?;
        let mut words = self.rows.lock().await.clone();
        words.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(words)
    }

    async fn insert_word(&self, word: &str) -> Result<Word, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().await;
        let id = rows.len() as i32 + 1;
        rows.push(Word {
            id,
            word: word.to_string(),
            created_at: Some(Utc::now()),
        });
        Ok(Word {
            id,
            word: word.to_string(),
            created_at: None,
        })
    }
}
