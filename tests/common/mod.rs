//! Shared helpers for integration tests

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use react_agent::agent::{AgentConfig, ReactAgent};
use react_agent::llm::ScriptedProvider;
use react_agent::tools::{Tool, ToolRegistry, ToolResult};

/// Tool that records every input it receives
pub struct RecordingTool {
    name: String,
    reply: String,
    inputs: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl RecordingTool {
    pub fn new(name: &str, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: reply.to_string(),
            inputs: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Records its input and returns a fixed reply"
    }

    async fn execute(&self, input: &str) -> Result<ToolResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(input.to_string());
        Ok(ToolResult::success(self.reply.clone()))
    }
}

/// Build a quiet agent over a scripted provider
pub fn agent_with(
    tools: Vec<Arc<dyn Tool>>,
    script: &[&str],
    configure: impl FnOnce(AgentConfig) -> AgentConfig,
) -> (ReactAgent, Arc<ScriptedProvider>) {
    let llm = Arc::new(ScriptedProvider::new(script.iter().copied()));
    let registry = ToolRegistry::new(tools).expect("valid registry");
    let config = configure(AgentConfig::new(registry).with_verbose(false));
    let agent = ReactAgent::new(config, llm.clone()).expect("valid config");
    (agent, llm)
}

/// A request received by [`serve_once`]
#[derive(Debug)]
pub struct CapturedRequest {
    /// Request line and headers
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// Answer one HTTP request on a local port with a canned response
///
/// Returns the base URL to point a client at and a handle that resolves to
/// the request the client sent.
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept client");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let request = loop {
            let n = socket.read(&mut chunk).await.expect("read request");
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).into_owned();
            if n == 0 {
                break text;
            }
            if let Some(end) = text.find("\r\n\r\n") {
                let body_len = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if text.len() >= end + 4 + body_len {
                    break text;
                }
            }
        };

        socket.write_all(response.as_bytes()).await.expect("write response");
        socket.shutdown().await.ok();

        let (head, body) = request.split_once("\r\n\r\n").unwrap_or((request.as_str(), ""));
        CapturedRequest {
            head: head.to_string(),
            body: body.to_string(),
        }
    });

    (format!("http://{}", addr), handle)
}
