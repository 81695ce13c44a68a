use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RowError;
use crate::listing::RawListing;
use crate::salary::{format_salary, NOT_SPECIFIED};

/// Canonical job record written to stdout. Stable regardless of which
/// scraper produced the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedJob {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub date_posted: String,
    pub salary: String,
    pub job_type: String,
    /// Placeholder. Always `0.0` here; a downstream scorer fills it in.
    pub match_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyInfo>,
    /// Set only by multi-query searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub industry: String,
    pub size: String,
    pub description: String,
    pub logo: String,
}

impl CompanyInfo {
    /// `None` when the listing carries no employer metadata at all.
    fn from_listing(raw: &RawListing) -> Option<Self> {
        let info = Self {
            industry: text(&raw.company_industry),
            size: text(&raw.company_employees_label),
            description: text(&raw.company_description),
            logo: text(&raw.company_logo),
        };
        let any = [&info.industry, &info.size, &info.description, &info.logo]
            .iter()
            .any(|s| !s.is_empty());
        any.then_some(info)
    }
}

impl NormalizedJob {
    pub fn from_listing(raw: RawListing) -> Result<Self, RowError> {
        let salary = format_salary(raw.interval.as_deref(), raw.min_amount, raw.max_amount)?;
        let company_info = CompanyInfo::from_listing(&raw);

        Ok(Self {
            location: join_location(raw.city.as_deref(), raw.state.as_deref()),
            url: first_non_empty(raw.job_url, raw.job_url_direct),
            job_type: non_empty(raw.job_type).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            job_id: raw.id.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            company: raw.company.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            date_posted: raw.date_posted.unwrap_or_default(),
            salary,
            match_score: 0.0,
            company_info,
            source_query: None,
        })
    }
}

/// Normalize one untyped dataset row.
pub fn normalize_row(row: Value) -> Result<NormalizedJob, RowError> {
    NormalizedJob::from_listing(RawListing::from_value(row)?)
}

/// `"{city}, {state}"` with stray separators trimmed, so a lone city or
/// state stands on its own and two blanks give `""`.
pub fn join_location(city: Option<&str>, state: Option<&str>) -> String {
    format!("{}, {}", city.unwrap_or(""), state.unwrap_or(""))
        .trim_matches(|c| c == ',' || c == ' ')
        .to_string()
}

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

fn first_non_empty(primary: Option<String>, fallback: Option<String>) -> String {
    non_empty(primary).or_else(|| non_empty(fallback)).unwrap_or_default()
}
