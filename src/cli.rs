//! Run configuration.
//!
//! Every setting comes from the environment (after `.env` is loaded), so
//! running the binary with no arguments performs a normal run. The matching
//! long flags exist only as overrides.
//!
//! Credentials are optional here on purpose: a missing key is reported by
//! the client that needs it, at the moment it is called.

use crate::publisher::DEFAULT_OUTPUT_DIR;
use clap::Parser;

pub const DEFAULT_MODEL: &str = "openrouter/horizon-beta";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// API key for the OpenAI-compatible model endpoint
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub openrouter_api_key: Option<String>,

    /// Base URL of the model endpoint (`/chat/completions` is appended)
    #[arg(long, env = "OPENROUTER_BASE_URL")]
    pub openrouter_base_url: Option<String>,

    /// Model identifier sent with every completion request
    #[arg(long, env = "OPENROUTER_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Tavily search API key
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub tavily_api_key: Option<String>,

    /// Directory the dated report is written to
    #[arg(long, env = "AI_NEWS_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,
}
