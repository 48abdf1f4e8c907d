//! Ollama NDJSON 流解析器
//!
//! Ollama `/api/chat` 的流式响应按行返回 JSON 对象，
//! 每行形如 `{"message":{"role":"assistant","content":"..."},"done":false}`，
//! 最后一行 `done` 为 true。

use serde_json::Value;
use tracing::warn;

/// 解析一行 NDJSON
///
/// 返回 (text_delta, is_done, error)；无法解析的行记录警告后跳过。
/// 不缓冲任何内容，每个增量只经手一次。
pub fn parse_chat_line(line: &str) -> (Option<String>, bool, Option<String>) {
    let json: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            warn!("[OllamaChat] 解析 JSON 失败: {} - line: {}", e, line);
            return (None, false, None);
        }
    };

    // 上游错误行: {"error":"..."}
    if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
        return (None, true, Some(error.to_string()));
    }

    let is_done = json.get("done").and_then(|d| d.as_bool()).unwrap_or(false);

    let text_delta = json
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    (text_delta, is_done, None)
}
