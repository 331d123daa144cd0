use std::future::Future;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::models::Word;

#[derive(Debug, Error)]
pub enum ClientError {
    /// 视图卸载导致的取消，不作为错误展示
    #[error("request cancelled")]
    Cancelled,

    #[error("server responded with {status}")]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// 服务端返回的 `error` 字段
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct WordsClient {
    http: reqwest::Client,
    base_url: String,
}

impl WordsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/words", self.base_url.trim_end_matches('/'))
    }

    pub async fn list_words(&self, cancel: &CancellationToken) -> Result<Vec<Word>, ClientError> {
        with_cancel(cancel, async {
            let response = self.http.get(self.endpoint()).send().await?;
            decode(response).await
        })
        .await
    }

    pub async fn create_word(
        &self,
        word: &str,
        cancel: &CancellationToken,
    ) -> Result<Word, ClientError> {
        with_cancel(cancel, async {
            let response = self
                .http
                .post(self.endpoint())
                .json(&json!({ "word": word }))
                .send()
                .await?;
            decode(response).await
        })
        .await
    }
}

async fn with_cancel<T, F>(cancel: &CancellationToken, request: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = request => result,
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response.json::<ErrorBody>().await.ok().map(|body| body.error);
    Err(ClientError::Api { status, message })
}
