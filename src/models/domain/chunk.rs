use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A bounded fragment of a single document, the unit that gets embedded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Chunk {
    pub text: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl Chunk {
    pub fn new(text: impl Into<String>) -> Self {
        Chunk {
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Chunk::new(text)
    }
}

/// A chunk paired with its embedding. Records are written once and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorRecord {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}
