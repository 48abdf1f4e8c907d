//! ChatModel Trait 定义
//!
//! 统一的聊天模型流式调用接口，Agent 通过它与具体后端解耦。

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::stream::StreamEvent;

/// 模型流式输出：惰性、有限、不可重放；丢弃即取消底层请求
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, ProviderError>> + Send>>;

/// Provider 层错误
///
/// 本层不做任何重试，错误原样上抛给调用方
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API 错误 ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("上游错误: {0}")]
    Upstream(String),

    #[error("无效的模型标识: {0}")]
    InvalidModel(String),

    #[error("不支持的 provider: {0}")]
    UnsupportedProvider(String),
}

/// 聊天消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// 角色: system, user, assistant
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// 聊天请求（总是流式，后端自行组装线上格式）
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// 完整模型标识，形如 `ollama:granite3.3:2b`
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// 聊天模型流式调用接口
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// 发起流式对话，返回增量事件流
    async fn chat_stream(&self, request: ChatRequest) -> Result<ChunkStream, ProviderError>;
}
