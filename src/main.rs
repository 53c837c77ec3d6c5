//! # AI News Digest
//!
//! Finds the week's Generative AI and agentic AI news, has a language model
//! summarize each article for a general audience, then has it compile those
//! summaries into one report saved as `ai_news_report_<YYYY-MM-DD>.md`.
//!
//! ## Usage
//!
//! ```sh
//! export OPENROUTER_API_KEY=... OPENROUTER_BASE_URL=https://openrouter.ai/api/v1
//! export TAVILY_API_KEY=...
//! ai_news_digest
//! ```
//!
//! ## Architecture
//!
//! One run is a straight line:
//! 1. **Search**: ask Tavily for up to 5 recent news articles
//! 2. **Summarize**: one model call per article, in order
//! 3. **Publish**: one model call to write the report, then save it
//!
//! Any failure ends the run; there are no retries and no partial output.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod error;
mod models;
mod pipeline;
mod publisher;
mod sources;
mod summarizer;
mod utils;

use api::OpenAiChat;
use cli::Cli;
use pipeline::Pipeline;
use sources::tavily::TavilyClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let dotenv = dotenvy::dotenv();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ai_news_digest starting up");
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env loaded"),
    }

    let args = Cli::parse();
    debug!(model = %args.model, output_dir = %args.output_dir, "Parsed configuration");

    let search = TavilyClient::new(args.tavily_api_key);
    let model = OpenAiChat::new(args.openrouter_api_key, args.openrouter_base_url, args.model);
    info!(model = %model.model(), "Model client ready");

    let pipeline = Pipeline::new(search, model, &args.output_dir);
    let final_state = pipeline.run().await?;

    let elapsed = start_time.elapsed();
    info!(
        articles = final_state.articles().map_or(0, <[_]>::len),
        summaries = final_state.summaries().map_or(0, <[_]>::len),
        complete = final_state.is_complete(),
        ?elapsed,
        "Execution complete"
    );

    println!("\n=== AI/ML Weekly News Report ===\n");
    println!("{}", final_state.report().unwrap_or_default());

    Ok(())
}
