//! Rolescope CLI - extract one job posting into one JSON-Lines record.
//!
//! Progress goes to stderr via tracing; stdout carries nothing but the final
//! record, so output can be appended straight to a dataset file:
//!
//! ```text
//! rolescope "https://example.com/jobs/123" >> data.jsonl
//! ```

use anyhow::Context;
use clap::Parser;
use rolescope_extractor::parse_llm_response;
use rolescope_llm::GeminiClient;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Extract a job posting into a single JSON-Lines record on stdout.
#[derive(Debug, Parser)]
#[command(name = "rolescope")]
#[command(version, about)]
#[command(after_help = "Example: rolescope \"https://example.com/jobs/123\" >> data.jsonl")]
struct Cli {
    /// Job posting URL to extract
    url: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Model to query
    #[arg(long, default_value = rolescope_llm::gemini::DEFAULT_MODEL)]
    model: String,

    /// Seconds to wait after the request to stay under API rate limits
    #[arg(long, default_value_t = 5)]
    rate_limit_delay: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    Url::parse(&cli.url).context("invalid URL provided")?;

    let client = GeminiClient::new(cli.api_key)?.with_model(cli.model);
    let raw = client.fetch_posting(&cli.url).await?;

    let posting = parse_llm_response(&raw).context("could not extract a record")?;

    // The record is the only thing allowed on stdout.
    println!("{}", posting.to_jsonl()?);

    if cli.rate_limit_delay > 0 {
        info!(seconds = cli.rate_limit_delay, "rate-limit delay");
        tokio::time::sleep(Duration::from_secs(cli.rate_limit_delay)).await;
    }

    Ok(())
}
