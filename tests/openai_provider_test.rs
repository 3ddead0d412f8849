// Live tests for the OpenAI provider
//
// Note: These tests require a valid OPENAI_API_KEY environment variable.
// Run with: cargo test --test openai_provider_test -- --ignored --nocapture

use anyhow::Result;
use react_agent::agent::{AgentConfig, ReactAgent};
use react_agent::llm::{LlmProvider, OpenAiProvider};
use react_agent::tools::{TextLengthTool, ToolRegistry};
use std::sync::Arc;

fn setup_provider() -> Result<OpenAiProvider> {
    // Use gpt-4o-mini for faster, cheaper tests
    Ok(OpenAiProvider::new(
        std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set for tests"),
    )?
    .with_model("gpt-4o-mini")
    .with_max_tokens(256)
    .with_temperature(0.0))
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn test_simple_completion() -> Result<()> {
    let provider = setup_provider()?;

    let response = provider.generate("Say exactly: 'test passed'", &[]).await?;

    assert!(response.to_lowercase().contains("test passed"));
    Ok(())
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn test_stop_sequence_respected() -> Result<()> {
    let provider = setup_provider()?;

    let response = provider
        .generate(
            "Repeat these two lines exactly:\nAction: search\nObservation: done",
            &["\nObservation".to_string()],
        )
        .await?;

    assert!(!response.contains("Observation"));
    Ok(())
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn test_react_agent_counts_letters() -> Result<()> {
    let llm = Arc::new(setup_provider()?);
    let tools = ToolRegistry::new(vec![Arc::new(TextLengthTool::new())])?;
    let agent = ReactAgent::new(AgentConfig::new(tools).with_max_iterations(Some(5)), llm)?;

    let outcome = agent.invoke("What is the length of the word: DOG").await?;

    assert!(!outcome.stopped_early);
    assert!(outcome.output().contains('3'));
    Ok(())
}
