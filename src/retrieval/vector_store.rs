//! In-memory vector store
//!
//! Documents are embedded once when added; queries are embedded on each
//! search and ranked by cosine similarity.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::embeddings::Embedder;
use super::{Document, Retriever};

struct Entry {
    document: Document,
    embedding: Vec<f32>,
}

/// Vector store kept entirely in memory
pub struct InMemoryVectorStore {
    embedder: Arc<dyn Embedder>,
    entries: RwLock<Vec<Entry>>,
}

impl InMemoryVectorStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Embed and store documents
    pub async fn add_documents(&self, documents: Vec<Document>) -> Result<()> {
        let texts: Vec<String> = documents.iter().map(|d| d.page_content.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;
        if embeddings.len() != documents.len() {
            anyhow::bail!(
                "embedder returned {} vectors for {} documents",
                embeddings.len(),
                documents.len()
            );
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("vector store lock poisoned"))?;
        for (document, embedding) in documents.into_iter().zip(embeddings) {
            entries.push(Entry { document, embedding });
        }
        tracing::info!("Vector store now holds {} documents", entries.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the `k` documents most similar to `query`, best first
    pub async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        Ok(self
            .similarity_search_with_score(query, k)
            .await?
            .into_iter()
            .map(|(doc, _)| doc)
            .collect())
    }

    /// Like [`similarity_search`](Self::similarity_search) but with scores
    pub async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<(Document, f32)>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedder
            .embed(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("embedder returned no vector for the query"))?;

        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow!("vector store lock poisoned"))?;

        let mut scored: Vec<(usize, f32)> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine_similarity(&query_embedding, &e.embedding)))
            .collect();
        // Stable sort keeps insertion order for equal scores
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        tracing::debug!("Similarity search over {} documents, k={}", entries.len(), k);

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, score)| (entries[i].document.clone(), score))
            .collect())
    }

    /// Wrap the store as a retriever returning `k` documents per query
    pub fn as_retriever(self: Arc<Self>, k: usize) -> VectorStoreRetriever {
        VectorStoreRetriever { store: self, k }
    }
}

/// Retriever over an [`InMemoryVectorStore`]
pub struct VectorStoreRetriever {
    store: Arc<InMemoryVectorStore>,
    k: usize,
}

#[async_trait]
impl Retriever for VectorStoreRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<Document>> {
        self.store.similarity_search(query, self.k).await
    }
}

/// Cosine similarity; zero vectors and length mismatches score 0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
