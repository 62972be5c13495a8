use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_LISTING_URL: &str =
    "https://api.github.com/repos/github/awesome-copilot/contents/prompts";
pub const DEFAULT_USER_AGENT: &str = "Blip-App-Build-Script";
pub const DEFAULT_FILE_SUFFIX: &str = ".prompt.md";

/// Sync configuration loaded from environment variables.
/// Every value has a default; only malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub listing_url: String,
    pub local_prompts_file: PathBuf,
    pub output_file: PathBuf,
    pub user_agent: String,
    pub file_suffix: String,
    pub request_delay_ms: u64,
    pub http_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            listing_url: env_or("PROMPTS_LISTING_URL", DEFAULT_LISTING_URL),
            local_prompts_file: env_or("PROMPTS_LOCAL_FILE", "src/data/local_prompts.json")
                .into(),
            output_file: env_or("PROMPTS_OUTPUT_FILE", "src/data/prompts.json").into(),
            user_agent: env_or("PROMPTS_USER_AGENT", DEFAULT_USER_AGENT),
            file_suffix: env_or("PROMPTS_FILE_SUFFIX", DEFAULT_FILE_SUFFIX),
            request_delay_ms: env_or("PROMPTS_REQUEST_DELAY_MS", "100")
                .parse::<u64>()
                .context("PROMPTS_REQUEST_DELAY_MS must be a whole number of milliseconds")?,
            http_timeout_secs: env_or("PROMPTS_HTTP_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("PROMPTS_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
