use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use itmo_qa::config::Config;
use itmo_qa::llm::YandexGptClient;
use itmo_qa::pipeline::Pipeline;
use itmo_qa::search::TavilyClient;
use itmo_qa::server::{routes, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let search = TavilyClient::new(&config.tavily_api_key, &config.tavily_url, config.max_results);
    let llm = YandexGptClient::new(
        &config.yandex_api_key,
        &config.yandex_folder_id,
        &config.completion_model,
        &config.completion_url,
    );
    let pipeline = Pipeline::new(Arc::new(search), Arc::new(llm), config.temperature);

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context(format!("Failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, routes(state))
        .await
        .context("Server error")?;

    Ok(())
}
