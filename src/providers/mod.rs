//! 模型后端接入
//!
//! `provider:model` 形式的模型标识决定由哪个后端服务该模型；
//! 目前只接入 Ollama，未知 provider 直接报错（快速失败，不重试）。

pub mod ollama;
pub mod traits;

pub use ollama::OllamaProvider;
pub use traits::{ChatMessage, ChatModel, ChatRequest, ChunkStream, ProviderError};

/// 拆分后的模型标识
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    /// provider 命名空间，如 `ollama`
    pub provider: String,
    /// 模型名，可以自带冒号（如 `granite3.3:2b`）
    pub model: String,
}

impl ModelRef {
    /// 按第一个 `:` 拆分 provider 与模型名
    pub fn parse(identifier: &str) -> Result<Self, ProviderError> {
        match identifier.split_once(':') {
            Some((provider, model)) if !provider.is_empty() && !model.is_empty() => Ok(Self {
                provider: provider.to_string(),
                model: model.to_string(),
            }),
            _ => Err(ProviderError::InvalidModel(identifier.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_ref() {
        let model_ref = ModelRef::parse("ollama:granite3.3:2b").unwrap();
        assert_eq!(model_ref.provider, "ollama");
        assert_eq!(model_ref.model, "granite3.3:2b");
    }

    #[test]
    fn test_parse_without_separator_fails() {
        assert!(matches!(
            ModelRef::parse("granite"),
            Err(ProviderError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_parse_empty_segments_fail() {
        assert!(ModelRef::parse(":granite").is_err());
        assert!(ModelRef::parse("ollama:").is_err());
        assert!(ModelRef::parse("").is_err());
    }
}
