//! JobSearch tests against an in-memory provider.
//!
//! Each test: register provider rows → run a search → assert on the report.
//! No network.

use std::sync::Arc;

use job_normalizer::testing::MockProvider;
use job_normalizer::{JobSearch, SearchError};
use serde_json::{json, Value};

fn search_with(provider: &Arc<MockProvider>, cap: u32) -> JobSearch {
    JobSearch::new(Box::new(Arc::clone(provider)), cap)
}

fn listing(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "company": "Acme",
        "city": "Portland",
        "state": "OR",
        "job_url": format!("https://www.indeed.com/viewjob?jk={id}"),
        "date_posted": "2024-05-01",
    })
}

// ---------------------------------------------------------------------------
// Single query
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_result_is_empty_list() {
    let provider = Arc::new(MockProvider::new().on_query("welder", vec![]));
    let report = search_with(&provider, 50)
        .search_jobs("welder", "Tulsa, OK", 10, 14)
        .await
        .unwrap();

    assert!(report.jobs.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(serde_json::to_string(&report.jobs).unwrap(), "[]");
}

#[tokio::test]
async fn bad_row_skipped_with_one_warning() {
    let provider = Arc::new(MockProvider::new().on_query(
        "rust",
        vec![
            listing("a1", "Rust Engineer"),
            listing("a2", "Systems Engineer"),
            json!({ "id": "a3", "min_amount": "negotiable" }),
            listing("a4", "Platform Engineer"),
        ],
    ));
    let report = search_with(&provider, 50)
        .search_jobs("rust", "Remote", 10, 14)
        .await
        .unwrap();

    assert_eq!(report.jobs.len(), 3);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0]
        .warning
        .starts_with("Error formatting job: "));
    let ids: Vec<&str> = report.jobs.iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a4"]);
}

#[tokio::test]
async fn provider_failure_is_fatal() {
    let provider = Arc::new(MockProvider::new().failing("rust", "connection reset"));
    let err = search_with(&provider, 50)
        .search_jobs("rust", "Remote", 10, 14)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Provider(_)));
    assert_eq!(err.to_string(), "connection reset");
}

#[tokio::test]
async fn request_parameters_reach_provider() {
    let provider = Arc::new(MockProvider::new().on_query("chef", vec![]));
    search_with(&provider, 50)
        .search_jobs("chef", "New Orleans, LA", 12, 3)
        .await
        .unwrap();

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search_term, "chef");
    assert_eq!(calls[0].location, "New Orleans, LA");
    assert_eq!(calls[0].results_wanted, 12);
    assert_eq!(calls[0].hours_old, 72);
}

#[tokio::test]
async fn limit_clamped_to_cap() {
    let provider = Arc::new(MockProvider::new().on_query("chef", vec![]));
    search_with(&provider, 20)
        .search_jobs("chef", "", 500, 14)
        .await
        .unwrap();

    assert_eq!(provider.calls()[0].results_wanted, 20);
}

#[tokio::test]
async fn normalized_output_shape() {
    let provider = Arc::new(MockProvider::new().on_query(
        "barista",
        vec![json!({
            "id": 991,
            "title": "Barista",
            "city": "Seattle",
            "state": "",
            "job_url_direct": "https://cafe.example/jobs/7",
            "interval": "hourly",
            "min_amount": 19,
            "max_amount": 23.5,
            "company_logo": "https://cafe.example/logo.png",
        })],
    ));
    let report = search_with(&provider, 50)
        .search_jobs("barista", "Seattle, WA", 5, 14)
        .await
        .unwrap();

    let value = serde_json::to_value(&report.jobs).unwrap();
    assert_eq!(
        value,
        json!([{
            "jobId": "991",
            "title": "Barista",
            "company": "",
            "location": "Seattle",
            "description": "",
            "url": "https://cafe.example/jobs/7",
            "datePosted": "",
            "salary": "$19.00 - $23.50 per hour",
            "jobType": "Not specified",
            "matchScore": 0.0,
            "companyInfo": {
                "industry": "",
                "size": "",
                "description": "",
                "logo": "https://cafe.example/logo.png"
            }
        }])
    );
}

// ---------------------------------------------------------------------------
// Multiple queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn multiple_queries_tag_source() {
    let provider = Arc::new(
        MockProvider::new()
            .on_query("rust", vec![listing("r1", "Rust Dev")])
            .on_query("go", vec![listing("g1", "Go Dev")]),
    );
    let report = search_with(&provider, 50)
        .search_multiple(&["rust".into(), "go".into()], "Remote", 10, 14)
        .await
        .unwrap();

    assert_eq!(report.jobs.len(), 2);
    assert_eq!(report.jobs[0].source_query.as_deref(), Some("rust"));
    assert_eq!(report.jobs[1].source_query.as_deref(), Some("go"));
    let value = serde_json::to_value(&report.jobs[0]).unwrap();
    assert_eq!(value["sourceQuery"], "rust");
}

#[tokio::test]
async fn one_failing_query_does_not_hide_others() {
    let provider = Arc::new(
        MockProvider::new()
            .failing("rust", "actor run FAILED")
            .on_query("go", vec![listing("g1", "Go Dev")]),
    );
    let report = search_with(&provider, 50)
        .search_multiple(&["rust".into(), "go".into()], "Remote", 10, 14)
        .await
        .unwrap();

    assert_eq!(report.jobs.len(), 1);
    assert_eq!(report.jobs[0].job_id, "g1");
    assert_eq!(provider.calls().len(), 2);
}

#[tokio::test]
async fn all_queries_failing_is_fatal() {
    let provider = Arc::new(
        MockProvider::new()
            .failing("rust", "timeout")
            .failing("go", "401"),
    );
    let err = search_with(&provider, 50)
        .search_multiple(&["rust".into(), "go".into()], "Remote", 10, 14)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "All queries failed: rust: timeout; go: 401");
}

#[tokio::test]
async fn duplicates_across_queries_collapse() {
    let provider = Arc::new(
        MockProvider::new()
            .on_query("rust", vec![listing("x1", "Backend Dev"), listing("r2", "Rust Dev")])
            .on_query("backend", vec![listing("x1", "Backend Dev")]),
    );
    let report = search_with(&provider, 50)
        .search_multiple(&["rust".into(), "backend".into()], "Remote", 10, 14)
        .await
        .unwrap();

    let ids: Vec<&str> = report.jobs.iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(ids, vec!["x1", "r2"]);
    // Later copy wins.
    assert_eq!(report.jobs[0].source_query.as_deref(), Some("backend"));
}

#[tokio::test]
async fn per_query_results_capped() {
    let rows: Vec<Value> = (0..5).map(|i| listing(&format!("n{i}"), "Nurse")).collect();
    let provider = Arc::new(MockProvider::new().on_query("nurse", rows));
    let report = search_with(&provider, 50)
        .search_multiple(&["nurse".into(), "missing".into()], "Boston, MA", 3, 14)
        .await
        .unwrap();

    assert_eq!(report.jobs.len(), 3);
}
