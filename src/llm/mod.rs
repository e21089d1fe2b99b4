pub mod yandex;

pub use yandex::YandexGptClient;

use async_trait::async_trait;

use crate::prompt::ConversationMessage;

/// Text of the first completion candidate returned by the model.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        temperature: f64,
    ) -> anyhow::Result<Completion>;
}
