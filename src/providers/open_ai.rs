use async_openai::{config::OpenAIConfig, error::OpenAIError, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::{
    config::Config,
    errors::ProviderError,
    models::dto::question_dto::GeneratedQuestionDto,
    providers::{EmbeddingCapability, GenerationCapability},
};

/// Embedding and chat completion backed by the OpenAI API.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    generation_model: String,
    embedding_model: String,
    temperature: f32,
    max_tokens: u32,
    response_format: Value,
}

impl OpenAiProvider {
    pub fn new(config: &Config) -> Self {
        let mut openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());
        if let Some(base) = &config.openai_api_base {
            openai_config = openai_config.with_api_base(base);
        }

        Self {
            client: Client::with_config(openai_config),
            generation_model: config.generation_model.clone(),
            embedding_model: config.embedding_model.clone(),
            temperature: config.generation_temperature,
            max_tokens: config.generation_max_tokens,
            response_format: question_response_format(),
        }
    }

    fn chat_request(&self, prompt: &str) -> Value {
        json!({
            "model": self.generation_model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "response_format": self.response_format,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        })
    }
}

fn question_response_format() -> Value {
    let schema = serde_json::to_value(schemars::schema_for!(GeneratedQuestionDto))
        .unwrap_or_else(|_| json!({ "type": "object" }));
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "quiz_question",
            "schema": schema,
            "strict": false
        }
    })
}

impl From<OpenAIError> for ProviderError {
    fn from(err: OpenAIError) -> Self {
        ProviderError::Api(err.to_string())
    }
}

fn message_content(response: &Value) -> Result<String, ProviderError> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::MalformedResponse("chat completion has no message content".to_string())
        })
}

/// Pull vectors out of an embeddings response, ordered by their `index` field.
fn embedding_vectors(response: &Value, expected: usize) -> Result<Vec<Vec<f32>>, ProviderError> {
    let data = response["data"].as_array().ok_or_else(|| {
        ProviderError::MalformedResponse("embedding response has no data".to_string())
    })?;

    let mut indexed = Vec::with_capacity(data.len());
    for (fallback, item) in data.iter().enumerate() {
        let index = item["index"].as_u64().map(|i| i as usize).unwrap_or(fallback);
        let vector = item["embedding"]
            .as_array()
            .ok_or_else(|| {
                ProviderError::MalformedResponse(format!("embedding {} is not an array", index))
            })?
            .iter()
            .map(|v| v.as_f64().map(|f| f as f32))
            .collect::<Option<Vec<f32>>>()
            .ok_or_else(|| {
                ProviderError::MalformedResponse(format!("embedding {} has non-numeric values", index))
            })?;
        indexed.push((index, vector));
    }
    indexed.sort_by_key(|(index, _)| *index);

    if indexed.len() != expected {
        return Err(ProviderError::MalformedResponse(format!(
            "expected {} embeddings, got {}",
            expected,
            indexed.len()
        )));
    }

    Ok(indexed.into_iter().map(|(_, v)| v).collect())
}

#[async_trait]
impl GenerationCapability for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let response: Value = self
            .client
            .chat()
            .create_byot(self.chat_request(prompt))
            .await?;
        message_content(&response)
    }
}

#[async_trait]
impl EmbeddingCapability for OpenAiProvider {
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut vectors = self.embed_many(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| {
            ProviderError::MalformedResponse("embedding response was empty".to_string())
        })
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response: Value = self
            .client
            .embeddings()
            .create_byot(json!({
                "model": self.embedding_model,
                "input": texts,
            }))
            .await?;
        embedding_vectors(&response, texts.len())
    }
}
