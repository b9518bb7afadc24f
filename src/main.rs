//! Demo binary: runs every configured matching strategy over the bundled
//! sample campaigns and prints what each one returns.
//!
//! Chat-backed strategies are skipped when no endpoint is configured, so
//! the demo degrades to embedding and classifier output on a bare
//! environment.

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use adcat::campaigns::CAMPAIGNS;
use adcat::classifier::{HostedClassifier, IAB_MIXED_BERT_MODEL, IAB_MULTILABEL_MODEL};
use adcat::config::AppConfig;
use adcat::embed::EmbeddingIndex;
use adcat::encoder::{ApiEncoder, TextEncoder};
use adcat::hybrid::HybridParams;
use adcat::llm::{ChatCompletion, OpenAiChatClient};
use adcat::strategy::{
    CategoryMatcher, ClassifierStrategy, EmbeddingStrategy, HybridStrategy, LlmStrategy,
};
use adcat::types::CategoryMatch;
use adcat::vocabulary::Vocabulary;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let encoder = build_encoder(&config)?;

    let index = Arc::new(EmbeddingIndex::build(encoder, Vocabulary::iab().clone()).await?);
    info!(categories = index.vocabulary().len(), "embedding index ready");

    let classifier = Arc::new(HostedClassifier::new(config.classifier.clone())?);

    let mut strategies: Vec<(String, Box<dyn CategoryMatcher>)> = vec![
        (
            "SBERT".to_string(),
            Box::new(EmbeddingStrategy::new(Arc::clone(&index), 5, 0.3)),
        ),
        (
            "Mixed BERT".to_string(),
            Box::new(ClassifierStrategy::new(
                Arc::clone(&classifier),
                IAB_MIXED_BERT_MODEL,
                5,
            )),
        ),
        (
            "Multi-label IAB classifier".to_string(),
            Box::new(ClassifierStrategy::new(
                Arc::clone(&classifier),
                IAB_MULTILABEL_MODEL,
                5,
            )),
        ),
    ];

    for (provider, endpoint) in [("OpenAI", &config.openai), ("Llama", &config.llama)] {
        let Some(endpoint) = endpoint else {
            info!(provider, "chat endpoint not configured, skipping its strategies");
            continue;
        };
        let chat: Arc<dyn ChatCompletion> = Arc::new(OpenAiChatClient::new(endpoint.clone())?);
        strategies.push((
            format!("LLM ({provider}, model: {})", endpoint.model),
            Box::new(LlmStrategy::new(
                Arc::clone(&chat),
                endpoint.model.clone(),
                Vocabulary::iab().clone(),
                5,
            )),
        ));
        strategies.push((
            format!("Hybrid, SBERT + LLM ({provider}, model: {})", endpoint.model),
            Box::new(HybridStrategy::new(
                Arc::clone(&index),
                chat,
                endpoint.model.clone(),
                HybridParams::default(),
            )),
        ));
    }

    for campaign in CAMPAIGNS {
        println!("Campaign: {}", campaign.name);
        println!("Description: {}", campaign.description);
        println!("Keywords: {:?}\n", campaign.keywords);

        let keywords = campaign.keyword_text();
        for (label, strategy) in &strategies {
            match strategy.match_categories(&keywords).await {
                Ok(matches) => println!("{label} categories:\n{}\n", render(&matches)),
                Err(err) => warn!(%err, strategy = strategy.name(), "strategy failed, moving on"),
            }
        }
        println!("{}", "=".repeat(100));
    }

    Ok(())
}

#[cfg(feature = "onnx")]
fn build_encoder(config: &AppConfig) -> Result<Arc<dyn TextEncoder>, Box<dyn Error>> {
    if let Some(dir) = &config.onnx_model_dir {
        return Ok(Arc::new(adcat::onnx::OnnxEncoder::load(dir.clone())?));
    }
    Ok(Arc::new(ApiEncoder::new(config.encoder.clone())?))
}

#[cfg(not(feature = "onnx"))]
fn build_encoder(config: &AppConfig) -> Result<Arc<dyn TextEncoder>, Box<dyn Error>> {
    Ok(Arc::new(ApiEncoder::new(config.encoder.clone())?))
}

fn render(matches: &[CategoryMatch]) -> String {
    if matches.is_empty() {
        return "(none)".to_string();
    }
    matches
        .iter()
        .map(|m| match m.score {
            Some(score) => format!("{} ({score:.2})", m.name),
            None => m.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
