//! Retrieval-augmented answering
//!
//! A [`Retriever`] returns text chunks relevant to a query; [`format_docs`]
//! stitches them into a single context block; [`RetrievalQa`] feeds that
//! block to the model alongside the question.

pub mod embeddings;
pub mod qa;
pub mod vector_store;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use embeddings::{Embedder, OpenAiEmbeddings};
pub use qa::{QaAnswer, RetrievalQa, RAG_PROMPT};
pub use vector_store::{InMemoryVectorStore, VectorStoreRetriever};

/// A chunk of text with optional metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: Map::new(),
        }
    }

    /// Attach a metadata field
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Source of documents relevant to a query
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return relevant documents, most relevant first
    async fn retrieve(&self, query: &str) -> Result<Vec<Document>>;
}

/// Join document contents with a blank line, keeping retrieval order
pub fn format_docs(docs: &[Document]) -> String {
    docs.iter()
        .map(|d| d.page_content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
