//! 会话指令分词器
//!
//! 聊天文本中的内联指令（`lang:`、`llm:`、字面 `help`）用来配置会话，
//! 本身不参与翻译。检测对空格不敏感：匹配前会去掉文本中的全部空格。

pub mod session;

/// 默认 provider 命名空间前缀
pub const DEFAULT_PROVIDER_PREFIX: &str = "ollama:";

const LANG_MARKER: &str = "lang:";
const MODEL_MARKER: &str = "llm:";

/// 从一条消息文本解析出的指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// 使用说明请求（只对历史中最后一条消息生效）
    Help,
    /// 设置目标语言
    SetLanguage(String),
    /// 设置模型标识（缺少 provider 分隔符时自动补 `ollama:`）
    SetModel(String),
    /// 普通文本，原样保留
    PlainText(String),
}

impl Directive {
    /// 解析一条消息的文本
    ///
    /// 同一条消息里 `lang:` 优先于 `llm:`；指令值取第一个标记之后的
    /// 全部内容（空格已去除）。
    pub fn parse(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("help") {
            return Self::Help;
        }

        let stripped: String = text.chars().filter(|c| *c != ' ').collect();

        if let Some((_, value)) = stripped.split_once(LANG_MARKER) {
            return Self::SetLanguage(value.to_string());
        }
        if let Some((_, value)) = stripped.split_once(MODEL_MARKER) {
            return Self::SetModel(normalize_model(value));
        }

        Self::PlainText(text.to_string())
    }
}

/// 没有 provider 分隔符的模型名补默认命名空间；空值原样保留，不做校验
fn normalize_model(value: &str) -> String {
    if !value.is_empty() && !value.contains(':') {
        format!("{DEFAULT_PROVIDER_PREFIX}{value}")
    } else {
        value.to_string()
    }
}
