pub mod tavily;

pub use tavily::TavilyClient;

use async_trait::async_trait;

/// A single web search hit. The synthesized answer, when the provider
/// produces one, is attached to the top result only.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub content: String,
    pub answer: Option<String>,
    pub url: Option<String>,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>>;
}
