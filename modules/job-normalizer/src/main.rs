use std::process::ExitCode;

use apify_client::ApifyClient;
use tracing_subscriber::EnvFilter;

use job_normalizer::cli::{error_payload, execute, Cli, SearchRequest};
use job_normalizer::{ApifyJobProvider, Config, JobSearch, SearchError, SearchReport};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();

    // stdout carries the result document only, so logs go to stderr.
    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::try_parse_argv(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => return fail(&e),
    };

    match run(cli).await {
        Ok(report) => {
            for warning in &report.warnings {
                match serde_json::to_string(warning) {
                    Ok(line) => eprintln!("{line}"),
                    Err(e) => tracing::error!(error = %e, "Failed to encode warning"),
                }
            }
            match serde_json::to_string(&report.jobs) {
                Ok(body) => {
                    println!("{body}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    println!("{}", serde_json::json!({ "error": e.to_string() }));
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => fail(&e),
    }
}

async fn run(cli: Cli) -> Result<SearchReport, SearchError> {
    let req: SearchRequest = cli.into_request()?;

    let config = Config::from_env()?;
    config.log_redacted();

    let client = ApifyClient::with_base_url(config.apify_api_token.clone(), &config.apify_base_url);
    let provider = ApifyJobProvider::new(client, &config.apify_jobs_actor);
    let search = JobSearch::new(Box::new(provider), config.max_jobs_per_position);

    execute(&search, &req).await
}

fn fail(err: &SearchError) -> ExitCode {
    tracing::debug!(error = %err, "Invocation failed");
    println!("{}", error_payload(err));
    ExitCode::FAILURE
}
