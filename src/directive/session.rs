//! 逐轮会话配置解析
//!
//! 配置不跨轮保存：每轮都从完整历史重新推导一个不可变的
//! [`SessionConfig`]，再据此决定本轮动作。language 与 model 相互独立，
//! 历史中任何一条消息都可以设置，后出现的覆盖先出现的。

use crate::directive::Directive;
use crate::models::Message;

/// 使用说明文本
pub const USAGE: &str = "### Translator v1.0 usage

> lang:<language> e.g. lang:french

> llm:<model> e.g. llm:ollama:granite3.3:2b


Then, just give an English message and it will be translated for you!
";

/// 本轮从历史解析出的会话配置（空字符串视为未设置）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub language: Option<String>,
    pub model: Option<String>,
}

/// 本轮要执行的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAction {
    /// 直接回复一条说明或确认消息，不调用模型
    Reply(String),
    /// 调用模型做流式翻译
    Translate {
        language: String,
        model: String,
        /// 最后一条消息末尾片段的原始文本（未去除空格）
        text: String,
    },
}

/// 按时间顺序扫描全部历史，返回最近一次出现的 language / model 值
pub fn resolve_config(history: &[Message]) -> SessionConfig {
    scan(history).0
}

/// 决定本轮动作
///
/// `help` 只在最后一条消息上检查一次，出现在历史中间时当普通文本处理。
/// `lang:` / `llm:` 出现在最后一条消息时，直接确认并结束本轮，不做翻译。
/// 历史里从未出现 `lang:` 时无法翻译，回复使用说明。
pub fn resolve_turn(history: &[Message], default_model: &str) -> TurnAction {
    let last_text = history
        .last()
        .and_then(Message::last_text)
        .unwrap_or_default();

    if Directive::parse(last_text) == Directive::Help {
        return TurnAction::Reply(USAGE.to_string());
    }

    let (config, ack) = scan(history);
    if let Some(ack) = ack {
        return TurnAction::Reply(ack);
    }

    let Some(language) = config.language.filter(|l| !l.is_empty()) else {
        return TurnAction::Reply(USAGE.to_string());
    };
    let model = config
        .model
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default_model.to_string());

    TurnAction::Translate {
        language,
        model,
        text: last_text.to_string(),
    }
}

/// 扫描历史：积累最近的指令值，并在最后一条消息本身是指令时
/// 返回对应的确认文本
fn scan(history: &[Message]) -> (SessionConfig, Option<String>) {
    let mut config = SessionConfig::default();
    let last_index = history.len().saturating_sub(1);

    for (i, msg) in history.iter().enumerate() {
        let Some(text) = msg.last_text() else {
            continue;
        };
        match Directive::parse(text) {
            Directive::SetLanguage(value) => {
                let is_last = i == last_index;
                config.language = Some(value.clone());
                if is_last {
                    return (config, Some(format!("I am ready to translate to _{value}_")));
                }
            }
            Directive::SetModel(value) => {
                let is_last = i == last_index;
                config.model = Some(value.clone());
                if is_last {
                    return (
                        config,
                        Some(format!("I will try to use {value} in this conversation!")),
                    );
                }
            }
            Directive::Help | Directive::PlainText(_) => {}
        }
    }

    (config, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, MessagePart};
    use proptest::prelude::*;

    const DEFAULT_MODEL: &str = "ollama:granite3.3:2b";

    fn msg(text: &str) -> Message {
        Message::from_text(text)
    }

    fn history(texts: &[&str]) -> Vec<Message> {
        texts.iter().map(|t| msg(t)).collect()
    }

    #[test]
    fn test_final_help_short_circuits() {
        let action = resolve_turn(&history(&["lang:french", "help"]), DEFAULT_MODEL);
        assert_eq!(action, TurnAction::Reply(USAGE.to_string()));
    }

    #[test]
    fn test_final_lang_acknowledged() {
        let action = resolve_turn(&history(&["lang:french"]), DEFAULT_MODEL);
        assert_eq!(
            action,
            TurnAction::Reply("I am ready to translate to _french_".to_string())
        );
    }

    #[test]
    fn test_final_llm_acknowledged_with_prefix() {
        let action = resolve_turn(&history(&["lang:french", "llm:llava"]), DEFAULT_MODEL);
        assert_eq!(
            action,
            TurnAction::Reply("I will try to use ollama:llava in this conversation!".to_string())
        );
    }

    #[test]
    fn test_final_llm_with_provider_unchanged() {
        let action = resolve_turn(&history(&["llm:openai:gpt-4o"]), DEFAULT_MODEL);
        assert_eq!(
            action,
            TurnAction::Reply("I will try to use openai:gpt-4o in this conversation!".to_string())
        );
    }

    #[test]
    fn test_no_lang_anywhere_replies_usage() {
        let action = resolve_turn(&history(&["llm:llava", "Hello there"]), DEFAULT_MODEL);
        assert_eq!(action, TurnAction::Reply(USAGE.to_string()));
    }

    #[test]
    fn test_translation_with_default_model() {
        let action = resolve_turn(&history(&["lang:french", "Hello"]), DEFAULT_MODEL);
        assert_eq!(
            action,
            TurnAction::Translate {
                language: "french".to_string(),
                model: DEFAULT_MODEL.to_string(),
                text: "Hello".to_string(),
            }
        );
    }

    #[test]
    fn test_latest_directive_wins() {
        let action = resolve_turn(
            &history(&["lang:french", "lang:german", "llm:llava", "Hi"]),
            DEFAULT_MODEL,
        );
        assert_eq!(
            action,
            TurnAction::Translate {
                language: "german".to_string(),
                model: "ollama:llava".to_string(),
                text: "Hi".to_string(),
            }
        );
    }

    #[test]
    fn test_translation_text_keeps_spaces() {
        let action = resolve_turn(&history(&["lang:french", "Hello  dear  world"]), DEFAULT_MODEL);
        let TurnAction::Translate { text, .. } = action else {
            panic!("expected Translate");
        };
        assert_eq!(text, "Hello  dear  world");
    }

    #[test]
    fn test_empty_llm_value_falls_back_to_default() {
        // "llm:" 的空值视为未设置，回退到默认模型
        let action = resolve_turn(&history(&["lang:french", "llm:", "Hello"]), DEFAULT_MODEL);
        let TurnAction::Translate { model, .. } = action else {
            panic!("expected Translate");
        };
        assert_eq!(model, DEFAULT_MODEL);
    }

    #[test]
    fn test_help_mid_history_ignored() {
        let action = resolve_turn(&history(&["help", "lang:french", "Hello"]), DEFAULT_MODEL);
        assert!(matches!(action, TurnAction::Translate { .. }));
    }

    #[test]
    fn test_empty_history_replies_usage() {
        let action = resolve_turn(&[], DEFAULT_MODEL);
        assert_eq!(action, TurnAction::Reply(USAGE.to_string()));
    }

    #[test]
    fn test_partless_messages_skipped() {
        let mut h = history(&["lang:french"]);
        h.push(Message::default());
        h.push(Message {
            parts: vec![MessagePart::default()],
        });
        h.push(msg("Hello"));
        let action = resolve_turn(&h, DEFAULT_MODEL);
        assert!(matches!(action, TurnAction::Translate { .. }));
    }

    #[test]
    fn test_resolve_config_collects_latest_values() {
        let config = resolve_config(&history(&["lang:french", "llm:llava", "lang:german", "Hi"]));
        assert_eq!(config.language.as_deref(), Some("german"));
        assert_eq!(config.model.as_deref(), Some("ollama:llava"));
    }

    proptest! {
        // 同一份历史重复解析必须得到相同配置
        #[test]
        fn prop_resolve_config_idempotent(texts in proptest::collection::vec(".{0,40}", 0..8)) {
            let h: Vec<Message> = texts.iter().map(|t| msg(t)).collect();
            prop_assert_eq!(resolve_config(&h), resolve_config(&h));
        }

        #[test]
        fn prop_resolve_turn_idempotent(texts in proptest::collection::vec(".{0,40}", 0..8)) {
            let h: Vec<Message> = texts.iter().map(|t| msg(t)).collect();
            prop_assert_eq!(resolve_turn(&h, DEFAULT_MODEL), resolve_turn(&h, DEFAULT_MODEL));
        }
    }
}
