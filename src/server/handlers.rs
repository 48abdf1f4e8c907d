//! 请求处理器

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::{Stream, StreamExt};
use tracing::{error, info};
use uuid::Uuid;

use super::AppState;
use crate::models::RunRequest;

/// 存活探针
pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// 创建一次 Agent 运行
///
/// 输出以 SSE 返回：每个输出片段一个 `part` 事件，Agent 流失败时
/// 发一个 `error` 事件。客户端断开连接会丢弃流，连带取消底层
/// 模型请求。
pub async fn create_run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let run_id = Uuid::new_v4();
    info!(
        "[Server] run {} 启动: {} 条历史消息",
        run_id,
        request.input.len()
    );

    let stream = state.agent.respond(request.input).map(move |item| {
        let event = match item {
            Ok(part) => Event::default()
                .event("part")
                .data(serde_json::to_string(&part).unwrap_or_default()),
            Err(e) => {
                error!("[Server] run {} 失败: {}", run_id, e);
                Event::default()
                    .event("error")
                    .data(serde_json::json!({ "message": e.to_string() }).to_string())
            }
        };
        Ok(event)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
