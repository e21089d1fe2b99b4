use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::llm::CompletionProvider;
use crate::parse::{parse_completion, ParsedCompletion};
use crate::prompt::build_messages;
use crate::search::SearchProvider;

const QUERY_PREFIX: &str = "Question about ITMO University: ";

/// Sequences one query through search, prompt assembly, completion and
/// parsing. Search failures degrade to an empty source list; completion
/// failures propagate to the caller.
pub struct Pipeline {
    search: Arc<dyn SearchProvider>,
    llm: Arc<dyn CompletionProvider>,
    temperature: f64,
}

impl Pipeline {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        llm: Arc<dyn CompletionProvider>,
        temperature: f64,
    ) -> Self {
        Self {
            search,
            llm,
            temperature,
        }
    }

    pub async fn process(&self, query: &str) -> Result<ParsedCompletion> {
        let prefixed = format!("{QUERY_PREFIX}{query}");

        let results = match self.search.search(&prefixed).await {
            Ok(results) => results,
            Err(err) => {
                warn!(error = %err, "search failed, continuing without sources");
                Vec::new()
            }
        };
        info!(num_results = results.len(), "search complete");

        let messages = build_messages(&results, &prefixed);

        let completion = self
            .llm
            .complete(&messages, self.temperature)
            .await
            .context("Completion request failed")?;

        Ok(parse_completion(&completion.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Completion;
    use crate::prompt::{ConversationMessage, Role};
    use crate::search::SearchResult;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubSearch {
        outcome: Result<Vec<SearchResult>, String>,
    }

    #[async_trait]
    impl SearchProvider for StubSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
            match &self.outcome {
                Ok(results) => Ok(results.clone()),
                Err(msg) => Err(anyhow::anyhow!(msg.clone())),
            }
        }
    }

    struct StubCompletion {
        reply: String,
        seen: Mutex<Vec<ConversationMessage>>,
    }

    impl StubCompletion {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for StubCompletion {
        async fn complete(
            &self,
            messages: &[ConversationMessage],
            _temperature: f64,
        ) -> Result<Completion> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            Ok(Completion {
                text: self.reply.clone(),
            })
        }
    }

    #[tokio::test]
    async fn runs_the_full_sequence() {
        let search = Arc::new(StubSearch {
            outcome: Ok(vec![SearchResult {
                content: "founded in 1900".into(),
                answer: Some("1900".into()),
                url: Some("https://itmo.ru/".into()),
            }]),
        });
        let llm = Arc::new(StubCompletion::new(
            r#"{"answer":"1900","reasoning":"per the source","urls":["https://itmo.ru/"]}"#,
        ));
        let pipeline = Pipeline::new(search, llm.clone(), 0.7);

        let parsed = pipeline.process("when was ITMO founded?").await.unwrap();

        assert_eq!(parsed.answer, json!("1900"));
        assert_eq!(parsed.urls, vec!["https://itmo.ru/"]);

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::System);
        assert!(seen[0].text.contains("founded in 1900"));
        assert!(seen[1].text.starts_with(QUERY_PREFIX));
        assert!(seen[1].text.ends_with("when was ITMO founded?"));
    }

    #[tokio::test]
    async fn search_failure_degrades_to_empty_sources() {
        let search = Arc::new(StubSearch {
            outcome: Err("connection reset".into()),
        });
        let llm = Arc::new(StubCompletion::new(
            r#"{"answer":"null","reasoning":"","urls":[]}"#,
        ));
        let pipeline = Pipeline::new(search, llm.clone(), 0.7);

        let parsed = pipeline.process("some question").await.unwrap();

        assert!(parsed.answer.is_null());
        // The conversation is still well formed with an empty hint.
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
    }

    #[tokio::test]
    async fn malformed_completion_yields_empty_parse() {
        let search = Arc::new(StubSearch {
            outcome: Ok(Vec::new()),
        });
        let llm = Arc::new(StubCompletion::new("```json not valid"));
        let pipeline = Pipeline::new(search, llm, 0.7);

        let parsed = pipeline.process("q").await.unwrap();

        assert!(parsed.answer.is_null());
        assert_eq!(parsed.reasoning, "");
        assert!(parsed.urls.is_empty());
    }
}
