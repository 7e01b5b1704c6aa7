//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される共通のモデル実装を提供します。
#![cfg(test)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::time::Duration;

use async_trait::async_trait;

use crate::model::{
    GenerativeModel,
    ModelError,
};

/// 事前に登録した応答を順番に返すモデル
///
/// 応答が尽きた後の呼び出しは `ModelError::Unavailable` を返す。
#[derive(Debug, Default)]
pub(crate) struct ScriptedModel {
    /// 未消費の応答
    responses: Mutex<VecDeque<Result<String, String>>>,
    /// 受け取ったプロンプト
    prompts: Mutex<Vec<String>>,
    /// 応答までの待ち時間
    latency: Option<Duration>,
    /// 呼び出し回数
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 成功応答を追加する
    pub(crate) fn respond(self, text: &str) -> Self {
        self.push(Ok(text.to_string()));
        self
    }

    /// 失敗応答を追加する
    pub(crate) fn fail(self, reason: &str) -> Self {
        self.push(Err(reason.to_string()));
        self
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|prompts| prompts.clone()).unwrap_or_default()
    }

    /// 応答をキューに積む
    fn push(&self, response: Result<String, String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let next = self.responses.lock().ok().and_then(|mut responses| responses.pop_front());
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(ModelError::Unavailable(reason)),
            None => Err(ModelError::Unavailable("no scripted response left".to_string())),
        }
    }
}
