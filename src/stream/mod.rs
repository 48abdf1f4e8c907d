//! 流式事件类型
//!
//! 模型后端产生的增量事件，Agent 把其中的文本增量
//! 逐个转成输出片段转发，不缓冲完整响应。

pub mod parsers;

pub use parsers::parse_chat_line;

/// 流式响应事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// 文本增量
    TextDelta { text: String },
    /// 流结束
    Done,
}
