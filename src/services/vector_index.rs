use std::sync::Arc;

use crate::{
    errors::IndexError,
    models::domain::{Chunk, VectorRecord},
    providers::EmbeddingCapability,
};

pub const DEFAULT_TOP_K: usize = 4;
pub const DEFAULT_BATCH_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimilarityMetric {
    #[default]
    Cosine,
    DotProduct,
}

impl SimilarityMetric {
    /// Higher means more relevant. Vectors of different length score over
    /// their common prefix.
    pub fn score(self, a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        match self {
            SimilarityMetric::DotProduct => dot,
            SimilarityMetric::Cosine => {
                let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
                let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    0.0
                } else {
                    dot / (norm_a * norm_b)
                }
            }
        }
    }
}

/// Storage behind a [`VectorIndex`].
pub trait VectorStore: Send + Sync {
    /// Replace the whole collection.
    fn replace_all(&mut self, records: Vec<VectorRecord>);

    /// Up to `k` records by descending score; equal scores keep insertion order.
    fn search(&self, query: &[f32], k: usize, metric: SimilarityMetric) -> Vec<(Chunk, f32)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    records: Vec<VectorRecord>,
}

impl VectorStore for InMemoryVectorStore {
    fn replace_all(&mut self, records: Vec<VectorRecord>) {
        self.records = records;
    }

    fn search(&self, query: &[f32], k: usize, metric: SimilarityMetric) -> Vec<(Chunk, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (i, metric.score(query, &r.embedding)))
            .collect();

        // Stable sort, so ties stay in insertion order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .take(k)
            .map(|(i, score)| (self.records[i].chunk.clone(), score))
            .collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

pub struct VectorIndex {
    embedder: Arc<dyn EmbeddingCapability>,
    store: Box<dyn VectorStore>,
    metric: SimilarityMetric,
    batch_size: usize,
    built: bool,
}

impl VectorIndex {
    pub fn new(embedder: Arc<dyn EmbeddingCapability>) -> Self {
        Self {
            embedder,
            store: Box::new(InMemoryVectorStore::default()),
            metric: SimilarityMetric::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            built: false,
        }
    }

    pub fn with_store(mut self, store: Box<dyn VectorStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Embed and store every chunk. On any error the index keeps whatever it
    /// held before the call.
    pub async fn build(&mut self, chunks: Vec<Chunk>) -> Result<(), IndexError> {
        if chunks.is_empty() {
            return Err(IndexError::EmptyInput);
        }

        if let Some(position) = chunks.iter().position(|c| c.text.trim().is_empty()) {
            return Err(IndexError::InvalidChunk {
                position,
                reason: "chunk has no text".to_string(),
            });
        }

        let mut embeddings: Vec<Vec<f32>> = Vec::with_capacity(chunks.len());
        for (batch_no, batch) in chunks.chunks(self.batch_size).enumerate() {
            let offset = batch_no * self.batch_size;
            let vectors = self.embed_batch(offset, batch).await?;
            embeddings.extend(vectors);
        }

        let dimension = embeddings.first().map(Vec::len).unwrap_or(0);
        if let Some(position) = embeddings
            .iter()
            .position(|e| e.is_empty() || e.len() != dimension)
        {
            return Err(IndexError::EmbeddingFailure {
                position,
                reason: format!(
                    "expected a {}-dimensional embedding, got {}",
                    dimension,
                    embeddings[position].len()
                ),
            });
        }

        let records = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| VectorRecord { chunk, embedding })
            .collect::<Vec<_>>();

        log::info!("Indexed {} chunks", records.len());
        self.store.replace_all(records);
        self.built = true;
        Ok(())
    }

    /// Embed one batch; if the provider rejects it, retry chunk by chunk so
    /// the failing position can be reported.
    async fn embed_batch(&self, offset: usize, batch: &[Chunk]) -> Result<Vec<Vec<f32>>, IndexError> {
        let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();

        match self.embedder.embed_many(&texts).await {
            Ok(vectors) if vectors.len() == batch.len() => return Ok(vectors),
            Ok(vectors) => log::warn!(
                "Embedding batch at chunk {} returned {} vectors for {} chunks, retrying individually",
                offset,
                vectors.len(),
                batch.len()
            ),
            Err(e) => log::warn!(
                "Embedding batch at chunk {} failed ({}), retrying individually",
                offset,
                e
            ),
        }

        let mut vectors = Vec::with_capacity(batch.len());
        for (i, text) in texts.iter().enumerate() {
            let vector = self.embedder.embed_one(text).await.map_err(|e| {
                log::error!("Bad chunk found at index {}", offset + i);
                IndexError::EmbeddingFailure {
                    position: offset + i,
                    reason: e.to_string(),
                }
            })?;
            vectors.push(vector);
        }
        Ok(vectors)
    }

    /// The `k` chunks most relevant to `text`, best first.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<(Chunk, f32)>, IndexError> {
        if !self.built {
            return Err(IndexError::NotBuilt);
        }

        let embedding = self
            .embedder
            .embed_one(text)
            .await
            .map_err(|e| IndexError::QueryFailure(e.to_string()))?;

        Ok(self.store.search(&embedding, k, self.metric))
    }
}
