use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{CreateWord, Word};
use crate::AppState;

/// 1. 获取全部单词，按创建时间倒序
pub async fn list_words(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Word>>, ApiError> {
    let words = state.store.list_words().await.map_err(ApiError::FetchWords)?;
    tracing::debug!("<<< 返回单词 {} 条", words.len());
    Ok(Json(words))
}

/// 2. 新增单词
///
/// 校验在访问数据库之前完成；同一文本重复提交会产生多条记录。
pub async fn create_word(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateWord>, JsonRejection>,
) -> Result<(StatusCode, Json<Word>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

    let word = match payload.word {
        Some(word) if !word.is_empty() => word,
        _ => return Err(ApiError::WordRequired),
    };

    let created = state.store.insert_word(&word).await.map_err(ApiError::AddWord)?;
    tracing::info!(">>> 新增单词: id={}, word={}", created.id, created.word);

    Ok((StatusCode::CREATED, Json(created)))
}
