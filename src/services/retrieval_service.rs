use crate::{errors::IndexError, services::vector_index::VectorIndex};

pub const CONTEXT_DELIMITER: &str = "\n\n";

/// Gathers the chunks most relevant to a topic into one context string.
pub struct RetrievalContextBuilder {
    top_k: usize,
}

impl Default for RetrievalContextBuilder {
    fn default() -> Self {
        Self {
            top_k: crate::services::vector_index::DEFAULT_TOP_K,
        }
    }
}

impl RetrievalContextBuilder {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// An empty string when nothing matches; synthesis then relies on the topic alone.
    pub async fn build_context(&self, index: &VectorIndex, topic: &str) -> Result<String, IndexError> {
        let results = index.query(topic, self.top_k).await?;
        if results.is_empty() {
            log::warn!("No matching documents found for topic '{}'", topic);
        }

        Ok(results
            .into_iter()
            .map(|(chunk, _)| chunk.text)
            .collect::<Vec<_>>()
            .join(CONTEXT_DELIMITER))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::domain::Chunk;
    use crate::test_utils::fakes::LetterEmbedder;

    async fn index(texts: &[&str]) -> VectorIndex {
        let mut index = VectorIndex::new(Arc::new(LetterEmbedder::default()));
        index
            .build(texts.iter().map(|t| Chunk::new(*t)).collect())
            .await
            .expect("index should build");
        index
    }

    #[tokio::test]
    async fn context_joins_chunks_in_relevance_order() {
        let index = index(&["zzz zzz", "photosynthesis", "photosynthesis uses light"]).await;
        let builder = RetrievalContextBuilder::new(2);

        let context = builder
            .build_context(&index, "photosynthesis")
            .await
            .expect("context should build");

        assert_eq!(context, "photosynthesis\n\nphotosynthesis uses light");
    }

    #[tokio::test]
    async fn zero_results_give_empty_context() {
        let index = index(&["anything"]).await;
        let builder = RetrievalContextBuilder::new(0);

        assert_eq!(builder.build_context(&index, "topic").await, Ok(String::new()));
    }

    #[tokio::test]
    async fn unbuilt_index_is_reported() {
        let index = VectorIndex::new(Arc::new(LetterEmbedder::default()));
        let builder = RetrievalContextBuilder::default();

        assert_eq!(
            builder.build_context(&index, "topic").await,
            Err(IndexError::NotBuilt)
        );
    }
}
