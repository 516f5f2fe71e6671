use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Extra time the HTTP client allows beyond the gateway timeout, so a slow
/// call always ends as a gateway timeout rather than a transport error.
const CLIENT_TIMEOUT_GRACE: Duration = Duration::from_secs(5);

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub llm_model: String,
    pub llm_api_url: String,
    pub llm_timeout: Duration,
    pub total_questions: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let total_questions = optional_env("INTERVIEW_TOTAL_QUESTIONS", "3")
            .parse::<u32>()
            .context("INTERVIEW_TOTAL_QUESTIONS must be a positive integer")?;
        ensure!(
            total_questions >= 1,
            "INTERVIEW_TOTAL_QUESTIONS must be at least 1"
        );

        let timeout_secs = optional_env("LLM_TIMEOUT_SECS", "60")
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            llm_model: optional_env("GROQ_MODEL", DEFAULT_MODEL),
            llm_api_url: optional_env("LLM_API_URL", DEFAULT_API_URL),
            llm_timeout: Duration::from_secs(timeout_secs),
            total_questions,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }

    /// Transport-level backstop for the HTTP client; `llm_timeout` is the real bound.
    pub fn client_timeout(&self) -> Duration {
        self.llm_timeout + CLIENT_TIMEOUT_GRACE
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
