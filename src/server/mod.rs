//! HTTP 托管层
//!
//! 用 axum 托管翻译 Agent：一次 run 对应一轮对话，
//! 输出以 SSE 流返回，客户端断开即取消本轮。

pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::agent::TranslationAgent;
use crate::providers::OllamaProvider;

/// 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<TranslationAgent<OllamaProvider>>,
}

/// 构建路由
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/runs", post(handlers::create_run))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
