pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{JobScraperInput, RunData, RunStatus};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

pub struct ApifyClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Point the client at a different API root (proxies, self-hosted mocks).
    pub fn with_base_url(token: String, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start an actor run. Returns immediately with run metadata.
    ///
    /// `actor_id` is either the opaque actor ID or `owner~name`.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let resp = check_status(resp).await?;
        let api_resp: ApiResponse<RunData> = resp.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient long-polling.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!("{}/actor-runs/{}?waitForFinish=60", self.base_url, run_id);
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let resp = check_status(resp).await?;
            let api_resp: ApiResponse<RunData> = resp.json().await?;
            match api_resp.data.run_status() {
                RunStatus::Succeeded => return Ok(api_resp.data),
                RunStatus::Failed => {
                    return Err(ApifyError::RunFailed {
                        run_id: api_resp.data.id,
                        status: api_resp.data.status,
                    });
                }
                RunStatus::InProgress => {
                    tracing::debug!(run_id, status = %api_resp.data.status, "Run still in progress");
                }
            }
        }
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", self.base_url, dataset_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let resp = check_status(resp).await?;
        let items: Vec<T> = resp.json().await?;
        Ok(items)
    }

    /// Scrape job listings end-to-end: start run, poll, fetch results.
    ///
    /// Rows come back untyped so callers can reject malformed rows one at a
    /// time instead of losing the whole dataset to a single bad item.
    pub async fn scrape_jobs(
        &self,
        actor_id: &str,
        input: &JobScraperInput,
    ) -> Result<Vec<serde_json::Value>> {
        tracing::info!(
            actor_id,
            search_term = %input.search_term,
            location = %input.location,
            results_wanted = input.results_wanted,
            hours_old = input.hours_old,
            "Starting job scrape"
        );

        let run = self.start_run(actor_id, input).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            started_at = ?completed.started_at,
            finished_at = ?completed.finished_at,
            duration_secs = ?completed.duration().map(|d| d.num_seconds()),
            "Run completed, fetching results"
        );

        let rows: Vec<serde_json::Value> = self
            .get_dataset_items(&completed.default_dataset_id)
            .await?;
        tracing::info!(count = rows.len(), "Fetched job listings");

        Ok(rows)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApifyError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(resp)
}
