use std::sync::Arc;

use anyhow::{Context, Result};
use apify_client::{ApifyClient, JobScraperInput};
use async_trait::async_trait;
use serde_json::Value;

const SITE_NAME: &str = "indeed";
const SORT_BY: &str = "date";
const DESCRIPTION_FORMAT: &str = "html";
const COUNTRY: &str = "USA";

/// Caller-controlled part of a scrape request. Site, sort order, description
/// format and country are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeParams {
    pub search_term: String,
    pub location: String,
    pub results_wanted: u32,
    pub hours_old: u32,
}

impl ScrapeParams {
    pub fn new(search_term: &str, location: &str, results_wanted: u32, days_old: u32) -> Self {
        Self {
            search_term: search_term.to_string(),
            location: location.to_string(),
            results_wanted,
            hours_old: days_old.saturating_mul(24),
        }
    }

    pub fn to_actor_input(&self) -> JobScraperInput {
        JobScraperInput {
            site_name: vec![SITE_NAME.to_string()],
            search_term: self.search_term.clone(),
            location: self.location.clone(),
            results_wanted: self.results_wanted,
            sort_by: SORT_BY.to_string(),
            description_format: DESCRIPTION_FORMAT.to_string(),
            country_indeed: COUNTRY.to_string(),
            hours_old: self.hours_old,
        }
    }
}

// --- JobProvider trait ---

/// Source of raw job listing rows. Rows stay untyped so one malformed row
/// can be skipped without discarding the rest.
#[async_trait]
pub trait JobProvider: Send + Sync {
    async fn fetch_jobs(&self, params: &ScrapeParams) -> Result<Vec<Value>>;
}

#[async_trait]
impl<T: JobProvider + ?Sized> JobProvider for Arc<T> {
    async fn fetch_jobs(&self, params: &ScrapeParams) -> Result<Vec<Value>> {
        (**self).fetch_jobs(params).await
    }
}

// --- Apify-backed provider ---

/// Runs a JobSpy-compatible scraper actor on Apify.
pub struct ApifyJobProvider {
    client: ApifyClient,
    actor_id: String,
}

impl ApifyJobProvider {
    pub fn new(client: ApifyClient, actor_id: &str) -> Self {
        Self {
            client,
            actor_id: actor_id.to_string(),
        }
    }
}

#[async_trait]
impl JobProvider for ApifyJobProvider {
    async fn fetch_jobs(&self, params: &ScrapeParams) -> Result<Vec<Value>> {
        let input = params.to_actor_input();
        match self.client.scrape_jobs(&self.actor_id, &input).await {
            Ok(rows) => Ok(rows),
            Err(e) if e.is_auth() => Err(e).context("Apify rejected APIFY_API_TOKEN"),
            Err(e) => {
                Err(e).with_context(|| format!("Job scrape via actor {} failed", self.actor_id))
            }
        }
    }
}
