use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::normalize::{normalize_row, NormalizedJob};
use crate::provider::{JobProvider, ScrapeParams};

pub const DEFAULT_DAYS_OLD: u32 = 14;

/// A row that was dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowWarning {
    pub warning: String,
}

/// Jobs that normalized cleanly plus one warning per skipped row.
#[derive(Debug, Default)]
pub struct SearchReport {
    pub jobs: Vec<NormalizedJob>,
    pub warnings: Vec<RowWarning>,
}

pub struct JobSearch {
    provider: Box<dyn JobProvider>,
    max_jobs_per_position: u32,
}

impl JobSearch {
    pub fn new(provider: Box<dyn JobProvider>, max_jobs_per_position: u32) -> Self {
        Self {
            provider,
            max_jobs_per_position,
        }
    }

    /// Fetch one query's listings and normalize every row.
    ///
    /// Provider failures abort the call. Malformed rows are skipped and
    /// reported in `SearchReport::warnings`.
    pub async fn search_jobs(
        &self,
        query: &str,
        location: &str,
        limit: u32,
        days_old: u32,
    ) -> Result<SearchReport, SearchError> {
        let results_wanted = limit.min(self.max_jobs_per_position);
        let params = ScrapeParams::new(query, location, results_wanted, days_old);
        info!(
            query,
            location,
            results_wanted,
            hours_old = params.hours_old,
            "Searching jobs"
        );

        let rows = self
            .provider
            .fetch_jobs(&params)
            .await
            .map_err(SearchError::Provider)?;

        let mut report = SearchReport::default();
        for (index, row) in rows.into_iter().enumerate() {
            match normalize_row(row) {
                Ok(job) => report.jobs.push(job),
                Err(e) => {
                    debug!(index, error = %e, "Skipping job row");
                    report.warnings.push(RowWarning {
                        warning: format!("Error formatting job: {e}"),
                    });
                }
            }
        }

        info!(
            query,
            jobs = report.jobs.len(),
            skipped = report.warnings.len(),
            "Search complete"
        );
        Ok(report)
    }

    /// Run several queries against the same location and merge the results.
    ///
    /// Each job is tagged with the query that found it and each query
    /// contributes at most `jobs_per_position` jobs. Jobs sharing
    /// `jobId + url` collapse into one: the later copy wins and keeps the
    /// earlier copy's position. Fails only when every query fails.
    pub async fn search_multiple(
        &self,
        queries: &[String],
        location: &str,
        jobs_per_position: u32,
        days_old: u32,
    ) -> Result<SearchReport, SearchError> {
        let mut merged = SearchReport::default();
        let mut failures = Vec::new();

        for query in queries {
            match self
                .search_jobs(query, location, jobs_per_position, days_old)
                .await
            {
                Ok(report) => {
                    merged.warnings.extend(report.warnings);
                    merged.jobs.extend(
                        report
                            .jobs
                            .into_iter()
                            .take(jobs_per_position as usize)
                            .map(|mut job| {
                                job.source_query = Some(query.clone());
                                job
                            }),
                    );
                }
                Err(e) => {
                    warn!(query = query.as_str(), error = %e, "Query failed");
                    failures.push(format!("{query}: {e}"));
                }
            }
        }

        if merged.jobs.is_empty() && !failures.is_empty() {
            return Err(SearchError::AllQueriesFailed(failures));
        }

        merged.jobs = dedupe_jobs(merged.jobs);
        Ok(merged)
    }
}

fn dedupe_jobs(jobs: Vec<NormalizedJob>) -> Vec<NormalizedJob> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<NormalizedJob> = Vec::with_capacity(jobs.len());
    for job in jobs {
        let key = format!("{}{}", job.job_id, job.url);
        match slots.get(&key) {
            Some(&slot) => unique[slot] = job,
            None => {
                slots.insert(key, unique.len());
                unique.push(job);
            }
        }
    }
    unique
}
