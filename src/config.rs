use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: String,
    pub tavily_url: String,
    pub yandex_api_key: String,
    pub yandex_folder_id: String,
    pub completion_model: String,
    pub completion_url: String,
    pub bind_addr: String,
    pub max_results: u8,
    pub temperature: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            tavily_api_key: std::env::var("TAVILY_API_KEY")
                .context("TAVILY_API_KEY must be set")?,
            tavily_url: std::env::var("TAVILY_URL")
                .unwrap_or_else(|_| "https://api.tavily.com/search".into()),
            yandex_api_key: std::env::var("YANDEX_API_KEY")
                .context("YANDEX_API_KEY must be set")?,
            yandex_folder_id: std::env::var("YANDEX_FOLDER_ID")
                .context("YANDEX_FOLDER_ID must be set")?,
            completion_model: std::env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| "yandexgpt".into()),
            completion_url: std::env::var("COMPLETION_URL").unwrap_or_else(|_| {
                "https://llm.api.cloud.yandex.net/foundationModels/v1/completion".into()
            }),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            max_results: std::env::var("MAX_RESULTS")
                .unwrap_or_else(|_| "3".into())
                .parse()
                .context("MAX_RESULTS must be a number")?,
            temperature: std::env::var("TEMPERATURE")
                .unwrap_or_else(|_| "0.7".into())
                .parse()
                .context("TEMPERATURE must be a number")?,
        })
    }
}
