//! 环境变量配置
//!
//! 启动时读取一次，之后作为不可变配置传递，不做运行时热更新。

use std::env;

pub const DEFAULT_MODEL: &str = "ollama:granite3.3:2b";
pub const DEFAULT_OLLAMA_HOST: &str = "127.0.0.1:11434";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8001;

/// 服务运行配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// 监听地址（`HOST`）
    pub host: String,
    /// 监听端口（`PORT`，解析失败时回退默认值）
    pub port: u16,
    /// 默认模型标识（`LLM_MODEL`）
    pub default_model: String,
    /// Ollama 服务地址（`OLLAMA_HOST`）
    pub ollama_host: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_model: DEFAULT_MODEL.to_string(),
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
        }
    }
}

impl RelayConfig {
    /// 从环境变量读取配置，缺省项使用默认值
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            default_model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            ollama_host: env::var("OLLAMA_HOST")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_HOST.to_string()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
