use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Input for a JobSpy-compatible job scraper actor.
///
/// Field names follow the actor's input schema, which mirrors the JobSpy
/// `scrape_jobs` keyword arguments.
#[derive(Debug, Clone, Serialize)]
pub struct JobScraperInput {
    pub site_name: Vec<String>,
    pub search_term: String,
    pub location: String,
    pub results_wanted: u32,
    pub sort_by: String,
    pub description_format: String,
    pub country_indeed: String,
    pub hours_old: u32,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Terminal and non-terminal states of an actor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    Failed,
    InProgress,
}

impl RunData {
    pub fn run_status(&self) -> RunStatus {
        match self.status.as_str() {
            "SUCCEEDED" => RunStatus::Succeeded,
            "FAILED" | "ABORTED" | "TIMED-OUT" => RunStatus::Failed,
            _ => RunStatus::InProgress,
        }
    }

    /// Wall-clock run time, once Apify has stamped both ends.
    pub fn duration(&self) -> Option<TimeDelta> {
        Some(self.finished_at? - self.started_at?)
    }
}
