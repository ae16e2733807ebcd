use std::{env, path::PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_api_base: Option<String>,
    pub generation_model: String,
    pub embedding_model: String,
    pub generation_temperature: f32,
    pub generation_max_tokens: u32,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub retrieval_top_k: usize,
    pub embedding_batch_size: usize,
    pub synthesis_max_attempts: u32,
    pub staging_dir: PathBuf,
    pub web_server_host: String,
    pub web_server_port: u16,
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE").ok().filter(|s| !s.is_empty()),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
            generation_temperature: parsed_or("GENERATION_TEMPERATURE", 0.2),
            generation_max_tokens: parsed_or("GENERATION_MAX_TOKENS", 1024),
            chunk_size: parsed_or("CHUNK_SIZE", 1000),
            chunk_overlap: parsed_or("CHUNK_OVERLAP", 200),
            retrieval_top_k: parsed_or("RETRIEVAL_TOP_K", 4),
            embedding_batch_size: parsed_or("EMBEDDING_BATCH_SIZE", 64),
            synthesis_max_attempts: parsed_or("SYNTHESIS_MAX_ATTEMPTS", 3),
            staging_dir: env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parsed_or("WEB_SERVER_PORT", 8080),
        }
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::Configuration(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }

        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size {
            return Err(AppError::Configuration(format!(
                "CHUNK_OVERLAP ({}) must be smaller than a non-zero CHUNK_SIZE ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.retrieval_top_k == 0
            || self.embedding_batch_size == 0
            || self.synthesis_max_attempts == 0
        {
            return Err(AppError::Configuration(
                "RETRIEVAL_TOP_K, EMBEDDING_BATCH_SIZE and SYNTHESIS_MAX_ATTEMPTS must be positive"
                    .to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: None,
            generation_model: "test-generation-model".to_string(),
            embedding_model: "test-embedding-model".to_string(),
            generation_temperature: 0.0,
            generation_max_tokens: 256,
            chunk_size: 1000,
            chunk_overlap: 200,
            retrieval_top_k: 4,
            embedding_batch_size: 8,
            synthesis_max_attempts: 3,
            staging_dir: env::temp_dir(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
