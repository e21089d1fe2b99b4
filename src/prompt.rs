//! Builds the two-message conversation sent to the completion model: a
//! system message carrying the answering rules with the search context and
//! hint answer filled into named slots, and a user message with the query.

use serde::{Deserialize, Serialize};

use crate::search::SearchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub text: String,
}

pub fn build_messages(results: &[SearchResult], query: &str) -> Vec<ConversationMessage> {
    vec![
        ConversationMessage {
            role: Role::System,
            text: system_message(results),
        },
        ConversationMessage {
            role: Role::User,
            text: query.to_string(),
        },
    ]
}

fn system_message(results: &[SearchResult]) -> String {
    let sources = results
        .iter()
        .map(|r| r.content.as_str())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    // Hint slot stays empty when the provider returned nothing.
    let hint = results
        .first()
        .and_then(|r| r.answer.as_deref())
        .unwrap_or("");

    format!(
        r#"You write a clear, precise answer to the user's question about ITMO University, following the template exactly.

Use the following source material:

{sources}

And a possible answer to the user's question:

{hint}

Base your answer first on the possible answer above, then on the source material.
Rules for "answer":
1) If the user's question lists answer options, "answer" is strictly the ordinal number of the correct option among those offered, and nothing else.
2) If the user's question has no answer options, "answer" is the answer itself.

The template you follow strictly, in JSON format:
{{
    "answer": "The answer to the user's question, per the rules above",
    "reasoning": "Why you gave this answer, based strictly on the source text only, without mentioning the possible answer",
    "urls": []
}}

Example when the user's question lists answer options (...some question...\n1. 2007\n2. 2009\n3. 2011\n4. 2015):
{{
    "answer": 2,
    "reasoning": "ITMO University was added to the list of National Research Universities of Russia in 2009. This is confirmed by official data from the Ministry of Science and Higher Education.",
    "urls": ["https://itmo.ru/ru/", "https://abit.itmo.ru/"]
}}

Example when the user's question has no answer options (...some question...):
{{
    "answer": "2023",
    "reasoning": "In 2023 ITMO University entered the top 400 of world universities in the ARWU (Shanghai Ranking) for the first time. This achievement is confirmed by the ranking's official site.",
    "urls": ["https://itmo.ru/ru/"]
}}

If the possible answer does not contain an answer to the question, disregard it and the source above, and find the answer and sources from your own knowledge. Those sources must contain a valid link. Add the links to the "urls" list.

The most important requirement: if in the end you have no answer, write the value "null" in "answer".

Follow these requirements strictly."#
    )
}
