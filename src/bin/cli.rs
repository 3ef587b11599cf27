//! Command-line driver for the RAG pipeline
//!
//! Run with: cargo run --bin scholar-rag -- "your research question"
//!
//! Reads `SEMANTIC_SCHOLAR_API_KEY` and `GOOGLE_API_KEY` from the
//! environment; the pipeline itself never touches env vars beyond the
//! config overlay.

use anyhow::Context;
use clap::Parser;
use scholar_rag::{RagConfig, RagPipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scholar-rag", about = "Academic research assistant with cited answers")]
struct Args {
    /// The research question to answer
    query: String,

    /// Optional TOML config file overriding the defaults
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scholar_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RagConfig::from_file(path)?,
        None => RagConfig::default(),
    };
    if config.llm.api_key.is_none() {
        config.llm.api_key = std::env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty());
    }

    let search_api_key = std::env::var("SEMANTIC_SCHOLAR_API_KEY")
        .context("SEMANTIC_SCHOLAR_API_KEY is not set")?;

    tracing::info!("Embedding model: {}", config.embeddings.model);
    tracing::info!("LLM model: {}", config.llm.model);

    let pipeline = RagPipeline::new(config);
    let result = pipeline.process_query(&args.query, &search_api_key).await;

    println!("\nAnswer:\n{}\n", result.answer);

    if !result.sources.is_empty() {
        println!("Sources:");
        for source in &result.sources {
            println!("  - {}", source);
        }
        println!();
    }

    println!(
        "[{} papers found, {} chunks retrieved, {}ms{}]",
        result.metrics.sources_found,
        result.metrics.docs_retrieved,
        result.metrics.response_time_ms,
        if result.metrics.is_error { ", ERROR" } else { "" }
    );

    Ok(())
}
