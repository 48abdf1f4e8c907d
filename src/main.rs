use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lingocast::agent::TranslationAgent;
use lingocast::config::RelayConfig;
use lingocast::providers::OllamaProvider;
use lingocast::server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lingocast=info")),
        )
        .init();

    let config = RelayConfig::from_env();
    info!("[Main] 配置: {:?}", config);

    let provider = OllamaProvider::new(reqwest::Client::new(), &config.ollama_host);
    let agent = TranslationAgent::new(Arc::new(provider), config.default_model.clone());
    let state = AppState {
        agent: Arc::new(agent),
    };

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法监听 {addr}"))?;
    info!("[Main] lingocast 启动于 http://{}", addr);

    axum::serve(listener, build_router(state))
        .await
        .context("服务异常退出")?;

    Ok(())
}
