pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod normalize;
pub mod provider;
pub mod salary;
pub mod search;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{Config, ConfigError};
pub use error::{RowError, SearchError};
pub use listing::RawListing;
pub use normalize::{normalize_row, CompanyInfo, NormalizedJob};
pub use provider::{ApifyJobProvider, JobProvider, ScrapeParams};
pub use search::{JobSearch, RowWarning, SearchReport, DEFAULT_DAYS_OLD};
