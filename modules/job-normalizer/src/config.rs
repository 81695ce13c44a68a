use std::env;

use thiserror::Error;

pub const DEFAULT_JOBS_ACTOR: &str = "borderline~indeed-scraper";
pub const DEFAULT_MAX_JOBS_PER_POSITION: u32 = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{key} must be a positive integer, got {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub apify_api_token: String,
    pub apify_jobs_actor: String,
    pub apify_base_url: String,
    /// Upper bound applied to every per-query result limit.
    pub max_jobs_per_position: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_jobs_per_position = match get("MAX_JOBS_PER_POSITION") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "MAX_JOBS_PER_POSITION",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_MAX_JOBS_PER_POSITION,
        };

        Ok(Self {
            apify_api_token: get("APIFY_API_TOKEN").ok_or(ConfigError::Missing("APIFY_API_TOKEN"))?,
            apify_jobs_actor: get("APIFY_JOBS_ACTOR")
                .unwrap_or_else(|| DEFAULT_JOBS_ACTOR.to_string()),
            apify_base_url: get("APIFY_BASE_URL")
                .unwrap_or_else(|| apify_client::DEFAULT_BASE_URL.to_string()),
            max_jobs_per_position,
        })
    }

    /// Log the effective config without secrets.
    pub fn log_redacted(&self) {
        tracing::debug!(
            apify_jobs_actor = %self.apify_jobs_actor,
            apify_base_url = %self.apify_base_url,
            apify_api_token_set = !self.apify_api_token.is_empty(),
            max_jobs_per_position = self.max_jobs_per_position,
            "Loaded config"
        );
    }
}
