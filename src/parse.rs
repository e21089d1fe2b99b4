//! Decodes the model's text output into a typed result: strip markdown code
//! fences, parse as JSON, fall back to an empty result on any failure.

use serde::Deserialize;
use serde_json::Value;

const CODE_FENCE: &str = "```";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParsedCompletion {
    #[serde(default)]
    pub answer: Value,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Parse failure discards the whole payload, there is no partial recovery.
pub fn parse_completion(raw: &str) -> ParsedCompletion {
    let stripped = raw.replace(CODE_FENCE, "");

    match serde_json::from_str::<ParsedCompletion>(stripped.trim()) {
        Ok(mut parsed) => {
            // The prompt asks for the literal string "null" when the model has
            // no answer; normalize it so clients see a real null.
            if parsed.answer == Value::String("null".into()) {
                parsed.answer = Value::Null;
            }
            parsed
        }
        Err(err) => {
            tracing::warn!(error = %err, "model output is not valid JSON, discarding");
            ParsedCompletion::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_output() {
        let parsed =
            parse_completion(r#"{"answer":"2009","reasoning":"x","urls":["https://a.b"]}"#);

        assert_eq!(parsed.answer, json!("2009"));
        assert_eq!(parsed.reasoning, "x");
        assert_eq!(parsed.urls, vec!["https://a.b"]);
    }

    #[test]
    fn strips_code_fences_before_parsing() {
        let parsed = parse_completion("```\n{\"answer\": 2, \"reasoning\": \"r\", \"urls\": []}\n```");

        assert_eq!(parsed.answer, json!(2));
        assert_eq!(parsed.reasoning, "r");
    }

    #[test]
    fn invalid_json_yields_empty_result() {
        let parsed = parse_completion(r#"{"answer": "2009", "reasoning": "#);

        assert_eq!(parsed, ParsedCompletion::default());
        assert!(parsed.answer.is_null());
        assert_eq!(parsed.reasoning, "");
        assert!(parsed.urls.is_empty());
    }

    #[test]
    fn missing_keys_default() {
        let parsed = parse_completion(r#"{"answer": "yes"}"#);

        assert_eq!(parsed.answer, json!("yes"));
        assert_eq!(parsed.reasoning, "");
        assert!(parsed.urls.is_empty());
    }

    #[test]
    fn literal_null_string_becomes_json_null() {
        let parsed = parse_completion(r#"{"answer": "null", "reasoning": "none found", "urls": []}"#);

        assert!(parsed.answer.is_null());
        assert_eq!(parsed.reasoning, "none found");
    }

    #[test]
    fn plain_text_output_yields_empty_result() {
        let parsed = parse_completion("I could not find an answer to that question.");

        assert_eq!(parsed, ParsedCompletion::default());
    }
}
