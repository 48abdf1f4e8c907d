//! 会话数据模型
//!
//! 定义对话历史的线上表示：消息由有序的内容片段组成，
//! 角色由消息在历史中的位置隐含，不单独存储。

use serde::{Deserialize, Serialize};

/// 一条消息里的内容片段
///
/// 只消费文本内容；没有文本的片段在解析时被跳过
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePart {
    /// 文本内容（可缺省）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl MessagePart {
    /// 创建纯文本片段
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}

/// 一轮对话消息（有序的片段序列）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

impl Message {
    /// 创建只含一个文本片段的消息
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            parts: vec![MessagePart::text(content)],
        }
    }

    /// 最后一个片段的文本；片段缺失或无文本时返回 None
    pub fn last_text(&self) -> Option<&str> {
        self.parts.last()?.content.as_deref()
    }
}

/// `POST /runs` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    /// 完整的对话历史，插入顺序即时间顺序
    pub input: Vec<Message>,
}
