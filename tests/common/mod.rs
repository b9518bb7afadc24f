//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use adcat::encoder::TextEncoder;
use adcat::error::{EmbedError, LlmError};
use adcat::llm::ChatCompletion;
use adcat::vocabulary::Vocabulary;
use async_trait::async_trait;
use serde_json::{Value, json};

/// The three-category vocabulary most tests run against.
pub fn sample_vocabulary() -> Vocabulary {
    Vocabulary::new(["Sports", "Technology", "Automotive"]).unwrap()
}

/// Deterministic encoder with a fixed direction per known phrase.
///
/// Directions live in a four-axis space: Sports, Technology, Automotive,
/// plus a fourth axis for off-topic content. Every vector is unit length,
/// so the cosine against a category axis is simply that component.
pub struct TableEncoder;

fn direction(text: &str) -> Vec<f32> {
    match text {
        "Sports" => vec![1.0, 0.0, 0.0, 0.0],
        "Technology" => vec![0.0, 1.0, 0.0, 0.0],
        "Automotive" => vec![0.0, 0.0, 1.0, 0.0],
        // cosine: Technology 0.8
        "buy laptops, gaming laptops, ultrabooks" => vec![0.0, 0.8, 0.0, 0.6],
        // cosine: Sports 0.6, Technology 0.48, Automotive 0.64
        "sports cars with smart tech" => vec![0.6, 0.48, 0.64, 0.0],
        // cosine: Sports 0.6, Technology 0.6, a deliberate tie
        "athletic tech apparel" => vec![0.6, 0.6, 0.0, 0.529_150_26],
        // cosine: Technology 0.296, which rounds up to the 0.3 cutoff
        "faintly technical" => vec![0.0, 0.296, 0.0, 0.955_188],
        _ => vec![0.0, 0.0, 0.0, 1.0],
    }
}

#[async_trait]
impl TextEncoder for TableEncoder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        Ok(direction(text))
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|t| direction(t)).collect())
    }
}

/// Encoder whose backend is down.
pub struct FailingEncoder;

#[async_trait]
impl TextEncoder for FailingEncoder {
    async fn encode(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
        Err(EmbedError::Request("connection refused".to_string()))
    }

    async fn encode_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Err(EmbedError::Request("connection refused".to_string()))
    }
}

/// Chat backend that replies with a fixed body and records every prompt.
pub struct ScriptedChat {
    content: String,
    seen: Mutex<Vec<String>>,
}

impl ScriptedChat {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A well-formed reply selecting exactly `categories`.
    pub fn selecting(categories: &[&str]) -> Self {
        let body = json!({
            "reasoning": "scripted",
            "categories": categories,
        });
        Self::new(body.to_string())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(
        &self,
        _model: &str,
        prompt: &str,
        _response_schema: Value,
    ) -> Result<String, LlmError> {
        self.seen.lock().unwrap().push(prompt.to_string());
        Ok(self.content.clone())
    }
}

/// Chat backend that always fails, with a configurable failure mode.
pub enum FailingChat {
    Transport,
    Status(u16),
}

#[async_trait]
impl ChatCompletion for FailingChat {
    async fn complete(
        &self,
        _model: &str,
        _prompt: &str,
        _response_schema: Value,
    ) -> Result<String, LlmError> {
        match self {
            FailingChat::Transport => Err(LlmError::Transport(
                "connection reset by peer".to_string(),
            )),
            FailingChat::Status(status) => Err(LlmError::Status {
                status: *status,
                body: "upstream unavailable".to_string(),
            }),
        }
    }
}

/// In-memory sink for captured tracing output.
#[derive(Clone, Default)]
pub struct LogBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with log output captured, returning its value and the log text.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, buffer.contents())
}

/// Drive a future on the calling thread so thread-local subscribers apply.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("current-thread runtime")
        .block_on(future)
}
