//! lingocast — 面向本地 LLM 的指令感知翻译中继
//!
//! 从对话历史中解析内联指令（`lang:`、`llm:`、`help`）得到目标语言和模型，
//! 然后把最后一条用户文本交给本地模型流式翻译。
//!
//! ## 模块结构
//! - directive/ - 指令分词与逐轮会话配置解析
//! - agent/ - 翻译 Agent 编排与提示词构建
//! - providers/ - 模型后端接入（Ollama）
//! - stream/ - 流式事件与 NDJSON 解析
//! - server/ - HTTP 托管（axum + SSE）

pub mod agent;
pub mod config;
pub mod directive;
pub mod models;
pub mod providers;
pub mod server;
pub mod stream;

pub use agent::TranslationAgent;
pub use config::RelayConfig;
