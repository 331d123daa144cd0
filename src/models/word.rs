use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Word {
    pub id: i32,
    pub word: String,
    // 新增接口只返回 id 和 word，不带时间戳
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWord {
    // 缺失与空串同样视为无效，交给 handler 判断
    #[serde(default)]
    pub word: Option<String>,
}
