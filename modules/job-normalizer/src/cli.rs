use clap::error::ErrorKind;
use clap::Parser;
use serde_json::json;

use crate::error::SearchError;
use crate::search::{JobSearch, SearchReport, DEFAULT_DAYS_OLD};

/// Command-line interface. Positionals are optional at the clap level so a
/// short argument list maps to the `Invalid arguments` error object instead
/// of clap's usage text.
#[derive(Parser, Debug)]
#[command(
    name = "job-search",
    version,
    about = "Search job listings and print them as normalized JSON"
)]
pub struct Cli {
    /// Search term, passed to the scraper unchanged
    #[arg(allow_hyphen_values = true)]
    pub query: Option<String>,

    /// Free-text location, passed to the scraper unchanged
    #[arg(allow_hyphen_values = true)]
    pub location: Option<String>,

    /// Number of results to request (positive integer)
    pub limit: Option<String>,

    /// Only include postings from the last N days
    #[arg(allow_negative_numbers = true)]
    pub days_old: Option<String>,

    /// Additional query to run against the same location (repeatable)
    #[arg(long = "also", value_name = "QUERY")]
    pub also: Vec<String>,
}

/// Validated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub location: String,
    pub limit: u32,
    pub days_old: u32,
    pub also: Vec<String>,
}

impl SearchRequest {
    pub fn queries(&self) -> Vec<String> {
        std::iter::once(self.query.clone())
            .chain(self.also.iter().cloned())
            .collect()
    }
}

impl Cli {
    /// Parse argv. `Ok(None)` means clap already handled `--help` or
    /// `--version` and the process should exit successfully.
    pub fn try_parse_argv<I, T>(argv: I) -> Result<Option<Self>, SearchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Self::try_parse_from(argv) {
            Ok(cli) => Ok(Some(cli)),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                let _ = e.print();
                Ok(None)
            }
            Err(_) => Err(SearchError::InvalidArguments),
        }
    }

    pub fn into_request(self) -> Result<SearchRequest, SearchError> {
        let (Some(query), Some(location), Some(limit)) = (self.query, self.location, self.limit)
        else {
            return Err(SearchError::InvalidArguments);
        };

        let limit = parse_int("limit", "a positive integer", &limit)?;
        if limit == 0 {
            return Err(SearchError::InvalidInteger {
                name: "limit",
                expected: "a positive integer",
                value: "0".to_string(),
            });
        }

        let days_old = match self.days_old {
            Some(raw) => parse_int("days_old", "a non-negative integer", &raw)?,
            None => DEFAULT_DAYS_OLD,
        };

        Ok(SearchRequest {
            query,
            location,
            limit,
            days_old,
            also: self.also,
        })
    }
}

fn parse_int(name: &'static str, expected: &'static str, raw: &str) -> Result<u32, SearchError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| SearchError::InvalidInteger {
            name,
            expected,
            value: raw.to_string(),
        })
}

/// Run the request: a single query, or a merged multi-query search when
/// `--also` was given.
pub async fn execute(search: &JobSearch, req: &SearchRequest) -> Result<SearchReport, SearchError> {
    if req.also.is_empty() {
        search
            .search_jobs(&req.query, &req.location, req.limit, req.days_old)
            .await
    } else {
        search
            .search_multiple(&req.queries(), &req.location, req.limit, req.days_old)
            .await
    }
}

/// The single JSON object printed on stdout for any fatal error.
pub fn error_payload(err: &SearchError) -> String {
    json!({ "error": err.to_string() }).to_string()
}
