//! Command line entry point
//!
//! Asks a ReAct agent one question, with web search when `TAVILY_API_KEY`
//! is set, and prints the result.
//!
//! Run with: cargo run -- "What is the weather like today in Mar del Plata?"

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use std::sync::Arc;

use react_agent::agent::{AgentConfig, ReactAgent, ReactPrompt};
use react_agent::cli::Console;
use react_agent::config::{log_dir_from_env, Settings};
use react_agent::llm::OpenAiProvider;
use react_agent::logging::init_logging;
use react_agent::structured::AgentResponse;
use react_agent::tools::{TavilySearchTool, TextLengthTool, Tool, ToolRegistry};

const DEFAULT_QUESTION: &str = "What is the weather like today in Mar del Plata?";

#[derive(Debug, Parser)]
#[command(name = "react-agent", about = "Answer a question with a ReAct agent")]
struct Args {
    /// Question for the agent
    #[arg(default_value = DEFAULT_QUESTION)]
    question: String,

    /// Maximum number of model calls, 0 for no limit
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Override the chat model
    #[arg(long)]
    model: Option<String>,

    /// Ask for a JSON answer with sources
    #[arg(long)]
    structured: bool,

    /// Only print the result, not the step-by-step trace
    #[arg(long, short)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_logging(&log_dir_from_env())?;
    let mut settings = Settings::from_env()?;

    if let Some(model) = args.model {
        settings.openai.model = model;
    }
    if let Some(n) = args.max_iterations {
        settings.max_iterations = (n > 0).then_some(n);
    }

    let llm = Arc::new(OpenAiProvider::from_settings(&settings.openai)?);

    let mut tools: Vec<Arc<dyn Tool>> = Vec::new();
    if let Some(tavily) = &settings.tavily {
        tools.push(Arc::new(TavilySearchTool::from_settings(tavily)?));
    }
    tools.push(Arc::new(TextLengthTool::new()));
    let registry = ToolRegistry::new(tools)?;

    let mut config = AgentConfig::new(registry)
        .with_max_iterations(settings.max_iterations)
        .with_verbose(!args.quiet);
    if args.structured {
        config = config.with_prompt(ReactPrompt::with_format_instructions(
            AgentResponse::format_instructions(),
        ));
    }

    let agent = ReactAgent::new(config, llm)?;
    let console = Console::new(true);

    match agent.invoke(&args.question).await {
        Ok(outcome) => {
            if args.structured {
                match outcome.parse_output::<AgentResponse>() {
                    Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
                    Err(e) => {
                        console.print_error(&e.to_string());
                        println!("{}", outcome.output());
                    }
                }
            } else {
                let result = json!({
                    "input": &outcome.input,
                    "output": outcome.output(),
                });
                println!("{}", result);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Agent run failed: {:?}", e);
            console.print_error(&e.to_string());
            Err(e.into())
        }
    }
}
