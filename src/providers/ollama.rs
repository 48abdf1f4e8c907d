//! Ollama Provider
//!
//! 通过 Ollama `/api/chat` 接口做流式对话，响应为 NDJSON 逐行返回。
//! 服务地址来自配置（`OLLAMA_HOST`），缺少 scheme 时自动补 `http://`。

use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, info};

use super::traits::{ChatModel, ChatRequest, ChunkStream, ProviderError};
use super::ModelRef;
use crate::stream::{parse_chat_line, StreamEvent};

/// 本 provider 服务的命名空间
const PROVIDER_NAMESPACE: &str = "ollama";

/// NDJSON 行缓冲
///
/// 网络分片的边界和行边界无关，多字节 UTF-8 字符可能被拆到两个
/// 分片里，因此按原始字节积累，只在完整行边界处解码。
#[derive(Debug, Default)]
struct NdjsonLineBuffer {
    buf: Vec<u8>,
}

impl NdjsonLineBuffer {
    fn new() -> Self {
        Self::default()
    }

    /// 追加一个网络分片，返回其中已完整的非空行
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw).trim().to_string();
            if !line.is_empty() {
                lines.push(line);
            }
        }
        lines
    }

    /// 取出流结束后残留的未换行数据
    fn take_tail(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let tail = String::from_utf8_lossy(&self.buf).trim().to_string();
        self.buf.clear();
        (!tail.is_empty()).then_some(tail)
    }
}

/// Ollama 后端客户端
pub struct OllamaProvider {
    client: Client,
    base_url: String,
}

impl OllamaProvider {
    /// `host` 可以不带 scheme，如 `127.0.0.1:11434`
    pub fn new(client: Client, host: &str) -> Self {
        let trimmed = host.trim_end_matches('/');
        let base_url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };
        Self { client, base_url }
    }
}

#[async_trait]
impl ChatModel for OllamaProvider {
    async fn chat_stream(&self, request: ChatRequest) -> Result<ChunkStream, ProviderError> {
        let model_ref = ModelRef::parse(&request.model)?;
        if model_ref.provider != PROVIDER_NAMESPACE {
            return Err(ProviderError::UnsupportedProvider(model_ref.provider));
        }

        let url = format!("{}/api/chat", self.base_url);
        info!(
            "[OllamaProvider] 发送流式请求: model={}, messages={}",
            model_ref.model,
            request.messages.len()
        );

        let body = json!({
            "model": model_ref.model,
            "messages": request.messages,
            "stream": true,
        });

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("[OllamaProvider] 请求失败: {} - {}", status, body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let mut byte_stream = response.bytes_stream();
        let stream = try_stream! {
            let mut lines = NdjsonLineBuffer::new();

            while let Some(chunk) = byte_stream.next().await {
                let bytes = chunk?;
                for line in lines.push(&bytes) {
                    debug!("[OllamaProvider] chunk: {}", line);

                    let (text_delta, is_done, upstream_error) = parse_chat_line(&line);
                    if let Some(message) = upstream_error {
                        Err(ProviderError::Upstream(message))?;
                    }
                    if let Some(text) = text_delta {
                        yield StreamEvent::TextDelta { text };
                    }
                    if is_done {
                        yield StreamEvent::Done;
                        return;
                    }
                }
            }

            // 流结束但缓冲区还有未换行的数据
            if let Some(tail) = lines.take_tail() {
                let (text_delta, is_done, upstream_error) = parse_chat_line(&tail);
                if let Some(message) = upstream_error {
                    Err(ProviderError::Upstream(message))?;
                }
                if let Some(text) = text_delta {
                    yield StreamEvent::TextDelta { text };
                }
                if is_done {
                    yield StreamEvent::Done;
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
