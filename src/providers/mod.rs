pub mod open_ai;

use async_trait::async_trait;

use crate::errors::ProviderError;

pub use open_ai::OpenAiProvider;

/// Turns text into vectors. Implementations must return one vector per input,
/// in input order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingCapability: Send + Sync {
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;
}

/// Completes a prompt with free-form text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationCapability: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
