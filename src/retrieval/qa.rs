//! Retrieval-augmented question answering
//!
//! One retrieval, one model call: the retrieved chunks are formatted into a
//! context block and the model is asked to answer from that context only.

use anyhow::{Context, Result};
use std::sync::Arc;

use super::{format_docs, Document, Retriever};
use crate::llm::LlmProvider;

/// Prompt used to answer from retrieved context
///
/// Placeholders: `{context}`, `{input}`
pub const RAG_PROMPT: &str = r#"Answer any use questions based solely on the context below:

<context>
{context}
</context>

Question: {input}"#;

/// Answer produced by [`RetrievalQa`]
#[derive(Debug, Clone)]
pub struct QaAnswer {
    pub answer: String,
    /// The documents the answer was grounded on, in retrieval order
    pub source_documents: Vec<Document>,
}

/// Retrieve-then-generate chain
pub struct RetrievalQa {
    llm: Arc<dyn LlmProvider>,
    retriever: Arc<dyn Retriever>,
    template: String,
}

impl RetrievalQa {
    pub fn new(llm: Arc<dyn LlmProvider>, retriever: Arc<dyn Retriever>) -> Self {
        Self {
            llm,
            retriever,
            template: RAG_PROMPT.to_string(),
        }
    }

    /// Use a custom prompt template with `{context}` and `{input}` placeholders
    pub fn with_template(mut self, template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains("{context}") || !template.contains("{input}") {
            anyhow::bail!("RAG template must contain {{context}} and {{input}}");
        }
        self.template = template;
        Ok(self)
    }

    /// Render the prompt for a question and its context
    pub fn render(&self, context: &str, input: &str) -> String {
        self.template
            .replace("{context}", context)
            .replace("{input}", input)
    }

    /// Answer `input` from retrieved context
    pub async fn invoke(&self, input: &str) -> Result<QaAnswer> {
        tracing::info!("Retrieval QA: {}", input);

        let source_documents = self
            .retriever
            .retrieve(input)
            .await
            .context("Retrieval failed")?;
        tracing::debug!("Retrieved {} documents", source_documents.len());

        let prompt = self.render(&format_docs(&source_documents), input);
        let answer = self.llm.generate(&prompt, &[]).await?;

        Ok(QaAnswer {
            answer: answer.trim().to_string(),
            source_documents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedProvider;
    use async_trait::async_trait;

    struct FixedRetriever(Vec<Document>);

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(&self, _query: &str) -> Result<Vec<Document>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_invoke_puts_context_in_prompt() {
        let llm = Arc::new(ScriptedProvider::new(["  Pinecone is a vector database.  "]));
        let retriever = Arc::new(FixedRetriever(vec![
            Document::new("Pinecone stores vectors."),
            Document::new("It supports similarity search."),
        ]));
        let qa = RetrievalQa::new(llm.clone(), retriever);

        let answer = qa.invoke("What is Pinecone?").await.unwrap();
        assert_eq!(answer.answer, "Pinecone is a vector database.");
        assert_eq!(answer.source_documents.len(), 2);

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0]
            .prompt
            .contains("<context>\nPinecone stores vectors.\n\nIt supports similarity search.\n</context>"));
        assert!(calls[0].prompt.ends_with("Question: What is Pinecone?"));
        assert!(calls[0].stop.is_empty());
    }

    #[test]
    fn test_template_requires_placeholders() {
        let qa = RetrievalQa::new(
            Arc::new(ScriptedProvider::default()),
            Arc::new(FixedRetriever(Vec::new())),
        );
        assert!(qa.with_template("no placeholders").is_err());
    }
}
