#![allow(dead_code)]

use std::{
    env,
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::json;

use quizzify_server::{
    config::Config,
    errors::ProviderError,
    providers::{EmbeddingCapability, GenerationCapability},
};

pub fn letter_vector(text: &str) -> Vec<f32> {
    let mut counts = vec![0.0; 26];
    for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
        counts[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
    }
    counts
}

/// Letter-frequency embeddings; counts every call it receives.
#[derive(Default)]
pub struct LetterEmbedder {
    pub calls: AtomicUsize,
}

impl LetterEmbedder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingCapability for LetterEmbedder {
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(letter_vector(text))
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| letter_vector(t)).collect())
    }
}

/// Returns the scripted responses in order, then fails.
pub struct ScriptedGenerator {
    responses: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<String>) -> Self {
        let mut responses = responses;
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationCapability for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .expect("lock")
            .pop()
            .ok_or_else(|| ProviderError::Api("no more scripted responses".to_string()))
    }
}

pub fn question_json(topic: &str, n: usize, answer: &str) -> String {
    json!({
        "question": format!("{} question {}?", topic, n),
        "choices": [
            { "key": "A", "value": "first" },
            { "key": "B", "value": "second" },
            { "key": "C", "value": "third" },
            { "key": "D", "value": "fourth" }
        ],
        "answer": answer,
        "explanation": format!("Because of fact {}", n)
    })
    .to_string()
}

pub fn staging_dir() -> PathBuf {
    let dir = env::temp_dir().join(format!("quizzify-it-{}", uuid::Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir).expect("staging dir should be created");
    dir
}

pub fn config() -> Config {
    Config {
        openai_api_key: SecretString::from("sk-integration".to_string()),
        openai_api_base: None,
        generation_model: "fake".to_string(),
        embedding_model: "fake".to_string(),
        generation_temperature: 0.0,
        generation_max_tokens: 128,
        chunk_size: 1000,
        chunk_overlap: 200,
        retrieval_top_k: 4,
        embedding_batch_size: 16,
        synthesis_max_attempts: 3,
        staging_dir: staging_dir(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 0,
    }
}
