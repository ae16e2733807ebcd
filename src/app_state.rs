use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::Config,
    errors::AppResult,
    providers::{EmbeddingCapability, GenerationCapability, OpenAiProvider},
    services::{
        document_processor::{DocumentProcessor, PageExtractor, PlainTextExtractor},
        quiz_builder_service::QuizBuilderService,
        quiz_session::QuizSession,
    },
};

/// Shared state for the single-user service: the ingested pages and at most
/// one active quiz session.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub quiz_builder: Arc<QuizBuilderService>,
    pub documents: Arc<RwLock<DocumentProcessor>>,
    pub session: Arc<RwLock<Option<QuizSession>>>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let provider = Arc::new(OpenAiProvider::new(&config));
        Self::with_providers(
            config,
            provider.clone(),
            provider,
            Arc::new(PlainTextExtractor),
        )
    }

    pub fn with_providers(
        config: Config,
        embedder: Arc<dyn EmbeddingCapability>,
        generator: Arc<dyn GenerationCapability>,
        extractor: Arc<dyn PageExtractor>,
    ) -> AppResult<Self> {
        let quiz_builder = Arc::new(QuizBuilderService::new(&config, embedder, generator)?);
        let documents = Arc::new(RwLock::new(DocumentProcessor::new(
            config.staging_dir.clone(),
            extractor,
        )));

        Ok(Self {
            config: Arc::new(config),
            quiz_builder,
            documents,
            session: Arc::new(RwLock::new(None)),
        })
    }
}
