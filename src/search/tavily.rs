use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SearchProvider, SearchResult};

const SEARCH_DEPTH: &str = "advanced";

#[derive(Debug, Clone)]
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_results: u8,
}

#[derive(Debug, Clone, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u8,
    search_depth: &'a str,
    include_answer: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<TavilyHit>,
}

#[derive(Debug, Clone, Deserialize)]
struct TavilyHit {
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: Option<String>,
}

impl TavilyClient {
    pub fn new(api_key: &str, base_url: &str, max_results: u8) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            max_results,
        }
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let request = TavilyRequest {
            api_key: &self.api_key,
            query,
            max_results: self.max_results,
            search_depth: SEARCH_DEPTH,
            include_answer: true,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Tavily API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Tavily API error ({}): {}", status, body);
        }

        let api_response: TavilyResponse = response
            .json()
            .await
            .context("Failed to parse Tavily API response")?;

        let mut results: Vec<SearchResult> = api_response
            .results
            .into_iter()
            .map(|hit| SearchResult {
                content: hit.content,
                answer: None,
                url: hit.url,
            })
            .collect();

        // Tavily reports the synthesized answer at the top level; the rest of
        // the pipeline expects it on the top result.
        if let Some(first) = results.first_mut() {
            first.answer = api_response.answer.filter(|a| !a.trim().is_empty());
        }

        Ok(results)
    }
}
