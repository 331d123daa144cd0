use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::api::{ClientError, WordsClient};
use crate::models::Word;

/// 成功提示自动消失的时间
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

const FETCH_FAILED: &str = "Failed to fetch words. Please try again.";
const ADD_FAILED: &str = "Failed to add word";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

/// 视图的全部本地状态
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub words: Vec<Word>,
    pub new_word: String,
    pub loading: bool,
    pub notice: Option<Notice>,
    // 每次提示变化都递增，过期的定时器据此放弃清除
    notice_seq: u64,
}

impl ViewState {
    fn show(&mut self, notice: Notice) -> u64 {
        self.notice_seq += 1;
        self.notice = Some(notice);
        self.notice_seq
    }

    fn clear_notice(&mut self) {
        self.notice_seq += 1;
        self.notice = None;
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Word List")?;

        if let Some(Notice::Success(message)) = &self.notice {
            writeln!(f, "✔ {}", message)?;
        }

        if self.loading && self.words.is_empty() {
            return writeln!(f, "Loading words...");
        }

        if let Some(Notice::Error(message)) = &self.notice {
            writeln!(f, "✖ {}", message)?;
            return writeln!(f, "Type :retry to reload");
        }

        if self.words.is_empty() {
            return writeln!(f, "No words added yet");
        }

        for word in &self.words {
            match word.created_at {
                Some(created_at) => writeln!(f, "- {} ({})", word.word, created_at.format("%Y-%m-%d"))?,
                None => writeln!(f, "- {}", word.word)?,
            }
        }
        Ok(())
    }
}

/// 单页视图：挂载时拉取列表，表单提交时新增单词
///
/// 所有请求共用挂载时创建的取消令牌；卸载（`teardown` 或 drop）后请求中止，
/// 之后不再修改状态。
pub struct WordsView {
    client: WordsClient,
    state: Arc<Mutex<ViewState>>,
    cancel: CancellationToken,
    notice_timeout: Duration,
    initial_fetch: Mutex<Option<JoinHandle<()>>>,
}

impl WordsView {
    /// 挂载视图并在后台发起列表请求，需在 tokio 运行时内调用
    pub fn mount(client: WordsClient) -> Self {
        Self::mount_with_notice_timeout(client, NOTICE_TIMEOUT)
    }

    pub fn mount_with_notice_timeout(client: WordsClient, notice_timeout: Duration) -> Self {
        let cancel = CancellationToken::new();
        let state = Arc::new(Mutex::new(ViewState {
            loading: true,
            ..Default::default()
        }));

        let fetch = tokio::spawn(fetch_words(client.clone(), state.clone(), cancel.clone()));

        Self {
            client,
            state,
            cancel,
            notice_timeout,
            initial_fetch: Mutex::new(Some(fetch)),
        }
    }

    /// 等待挂载时的列表请求结束
    pub async fn settle(&self) {
        let fetch = self.initial_fetch.lock().await.take();
        if let Some(fetch) = fetch {
            if let Err(e) = fetch.await {
                tracing::error!("Fetch task failed: {}", e);
            }
        }
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    pub async fn render(&self) -> String {
        self.state.lock().await.to_string()
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.lock().await.new_word = text.into();
    }

    /// 提交输入框内容。去除首尾空白后为空则什么都不做
    pub async fn submit(&self) {
        let word = self.state.lock().await.new_word.trim().to_string();
        if word.is_empty() {
            return;
        }

        self.state.lock().await.clear_notice();

        let result = self.client.create_word(&word, &self.cancel).await;

        // 等锁期间视图可能已被卸载，拿到锁后再检查
        let mut state = self.state.lock().await;
        if self.cancel.is_cancelled() {
            return;
        }
        match result {
            Ok(created) => {
                state.words.insert(0, created);
                state.new_word.clear();
                let seq = state.show(Notice::Success(format!("{} added successfully!", word)));
                drop(state);
                self.schedule_notice_clear(seq);
            }
            Err(ClientError::Cancelled) => {}
            Err(e) => {
                tracing::error!("Add word error: {}", e);
                let message = e.server_message().unwrap_or(ADD_FAILED).to_string();
                state.show(Notice::Error(message));
            }
        }
    }

    fn schedule_notice_clear(&self, seq: u64) {
        let state = self.state.clone();
        let cancel = self.cancel.clone();
        let delay = self.notice_timeout;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let mut state = state.lock().await;
                    if !cancel.is_cancelled() && state.notice_seq == seq {
                        state.clear_notice();
                    }
                }
            }
        });
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// 重试：卸载当前视图并重新挂载，等同于整页刷新
    pub fn reload(self) -> Self {
        self.teardown();
        Self::mount_with_notice_timeout(self.client.clone(), self.notice_timeout)
    }
}

impl Drop for WordsView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn fetch_words(client: WordsClient, state: Arc<Mutex<ViewState>>, cancel: CancellationToken) {
    let result = client.list_words(&cancel).await;

    let mut state = state.lock().await;
    if cancel.is_cancelled() {
        return;
    }
    match result {
        Ok(words) => state.words = words,
        Err(ClientError::Cancelled) => return,
        Err(e) => {
            tracing::error!("Fetch error: {}", e);
            state.show(Notice::Error(FETCH_FAILED.to_string()));
        }
    }
    state.loading = false;
}
