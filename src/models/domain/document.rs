use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SOURCE_KEY: &str = "source";
pub const PAGE_KEY: &str = "page";

/// One page of extracted text together with where it came from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub source_metadata: HashMap<String, String>,
    pub ingested_at: DateTime<Utc>,
}

impl Document {
    pub fn new(content: impl Into<String>, source_metadata: HashMap<String, String>) -> Self {
        Document {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            source_metadata,
            ingested_at: Utc::now(),
        }
    }

    pub fn from_page(filename: &str, page: usize, content: impl Into<String>) -> Self {
        let metadata = HashMap::from([
            (SOURCE_KEY.to_string(), filename.to_string()),
            (PAGE_KEY.to_string(), page.to_string()),
        ]);
        Self::new(content, metadata)
    }

    pub fn source(&self) -> Option<&str> {
        self.source_metadata.get(SOURCE_KEY).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_from_page_records_source_and_page() {
        let doc = Document::from_page("biology.pdf", 3, "Chlorophyll absorbs light.");

        assert_eq!(doc.source(), Some("biology.pdf"));
        assert_eq!(doc.source_metadata.get(PAGE_KEY).map(String::as_str), Some("3"));
        assert_eq!(doc.content, "Chlorophyll absorbs light.");
    }

    #[test]
    fn documents_get_distinct_ids() {
        let a = Document::new("a", HashMap::new());
        let b = Document::new("a", HashMap::new());

        assert_ne!(a.id, b.id);
    }
}
