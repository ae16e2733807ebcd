use std::sync::Arc;

use crate::{
    config::Config,
    errors::{AppResult, IndexError, InputError},
    models::domain::{quiz_bank::check_count, Chunk, Document},
    providers::{EmbeddingCapability, GenerationCapability},
    services::{
        chunker::TextChunker, quiz_bank_service::QuizBankService, quiz_session::QuizSession,
        retrieval_service::RetrievalContextBuilder, text_cleaner, vector_index::VectorIndex,
    },
};

/// Runs the whole pipeline from ingested pages to a ready quiz session.
pub struct QuizBuilderService {
    embedder: Arc<dyn EmbeddingCapability>,
    generator: Arc<dyn GenerationCapability>,
    chunker: TextChunker,
    bank_service: QuizBankService,
    embedding_batch_size: usize,
}

pub struct BuiltQuiz {
    pub session: QuizSession,
    pub chunk_count: usize,
}

impl QuizBuilderService {
    pub fn new(
        config: &Config,
        embedder: Arc<dyn EmbeddingCapability>,
        generator: Arc<dyn GenerationCapability>,
    ) -> Result<Self, InputError> {
        Ok(Self {
            embedder,
            generator,
            chunker: TextChunker::new(config.chunk_size, config.chunk_overlap)?,
            bank_service: QuizBankService::new(
                RetrievalContextBuilder::new(config.retrieval_top_k),
                config.synthesis_max_attempts,
            ),
            embedding_batch_size: config.embedding_batch_size,
        })
    }

    /// Split each page on its own, then clean every chunk and drop the ones
    /// left blank. Chunks never mix text from two pages.
    pub fn prepare_chunks(&self, documents: &[Document]) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = documents
            .iter()
            .flat_map(|doc| {
                self.chunker
                    .split(&doc.content)
                    .into_iter()
                    .map(|text| text_cleaner::clean(&text))
                    .filter(|text| !text.trim().is_empty())
                    .map(|text| Chunk::new(text).with_metadata(doc.source_metadata.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();

        log::info!(
            "Successfully split {} pages to {} chunks",
            documents.len(),
            chunks.len()
        );
        chunks
    }

    pub async fn build_index(&self, documents: &[Document]) -> Result<VectorIndex, IndexError> {
        let mut index =
            VectorIndex::new(self.embedder.clone()).with_batch_size(self.embedding_batch_size);
        index.build(self.prepare_chunks(documents)).await?;
        Ok(index)
    }

    pub async fn build_quiz(
        &self,
        documents: &[Document],
        topic: &str,
        num_questions: usize,
    ) -> AppResult<BuiltQuiz> {
        if documents.is_empty() {
            return Err(InputError::NoDocuments.into());
        }
        // Checked here too so a bad count never costs an embedding call.
        check_count(num_questions)?;

        let index = self.build_index(documents).await?;
        let bank = self
            .bank_service
            .generate(topic, num_questions, &index, self.generator.as_ref())
            .await?;

        Ok(BuiltQuiz {
            session: QuizSession::new(bank),
            chunk_count: index.len(),
        })
    }
}
