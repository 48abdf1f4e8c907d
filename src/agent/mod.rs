//! 翻译 Agent
//!
//! 编排一轮对话：指令解析 → 配置解析 → 提示词构建 → 流式翻译输出。
//! 每轮完全无状态，配置从传入的完整历史重新推导。

pub mod prompt;

use std::sync::Arc;

use async_stream::stream;
use futures::{Stream, StreamExt};
use tracing::info;

use crate::directive::session::{resolve_turn, TurnAction};
use crate::models::{Message, MessagePart};
use crate::providers::{ChatModel, ChatRequest, ProviderError};
use crate::stream::StreamEvent;

/// Agent 层错误（不在本层恢复，上抛给托管方）
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// 指令感知翻译 Agent
pub struct TranslationAgent<M: ChatModel> {
    model_client: Arc<M>,
    /// 历史中没有 `llm:` 指令时使用的模型标识
    default_model: String,
}

impl<M: ChatModel + 'static> TranslationAgent<M> {
    pub fn new(model_client: Arc<M>, default_model: impl Into<String>) -> Self {
        Self {
            model_client,
            default_model: default_model.into(),
        }
    }

    /// 处理一轮对话，返回惰性的输出片段流
    ///
    /// 说明/确认类回复只产出一个片段且不调用模型；翻译回复把模型的
    /// 文本增量逐个转发，每发一个片段让出一次调度权。丢弃返回的流
    /// 即取消底层模型请求。
    pub fn respond(
        &self,
        history: Vec<Message>,
    ) -> impl Stream<Item = Result<MessagePart, AgentError>> + Send {
        let model_client = Arc::clone(&self.model_client);
        let default_model = self.default_model.clone();

        stream! {
            match resolve_turn(&history, &default_model) {
                TurnAction::Reply(text) => {
                    yield Ok(MessagePart::text(text));
                }
                TurnAction::Translate { language, model, text } => {
                    info!(
                        "[TranslationAgent] 翻译请求: language={}, model={}",
                        language, model
                    );
                    let request = ChatRequest {
                        model,
                        messages: prompt::build_prompt(&language, &text),
                    };

                    let mut chunks = match model_client.chat_stream(request).await {
                        Ok(chunks) => chunks,
                        Err(e) => {
                            yield Err(AgentError::Provider(e));
                            return;
                        }
                    };

                    while let Some(event) = chunks.next().await {
                        match event {
                            Ok(StreamEvent::TextDelta { text }) => {
                                yield Ok(MessagePart::text(text));
                                // 转发一个片段后让出事件循环
                                tokio::task::yield_now().await;
                            }
                            Ok(StreamEvent::Done) => break,
                            Err(e) => {
                                yield Err(AgentError::Provider(e));
                                return;
                            }
                        }
                    }
                }
            }
        }
    }
}
