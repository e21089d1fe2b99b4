pub mod config;
pub mod llm;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod search;
pub mod server;
