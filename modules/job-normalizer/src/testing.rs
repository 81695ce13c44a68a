// In-memory JobProvider for tests.
//
// Responses are keyed by search term. Unregistered terms fail, like an
// unreachable scraper would. Every request is recorded for later assertions.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::provider::{JobProvider, ScrapeParams};

enum Response {
    Rows(Vec<Value>),
    Fail(String),
}

#[derive(Default)]
pub struct MockProvider {
    responses: HashMap<String, Response>,
    calls: Mutex<Vec<ScrapeParams>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_query(mut self, search_term: &str, rows: Vec<Value>) -> Self {
        self.responses
            .insert(search_term.to_string(), Response::Rows(rows));
        self
    }

    pub fn failing(mut self, search_term: &str, message: &str) -> Self {
        self.responses
            .insert(search_term.to_string(), Response::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<ScrapeParams> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobProvider for MockProvider {
    async fn fetch_jobs(&self, params: &ScrapeParams) -> Result<Vec<Value>> {
        self.calls.lock().unwrap().push(params.clone());
        match self.responses.get(&params.search_term) {
            Some(Response::Rows(rows)) => Ok(rows.clone()),
            Some(Response::Fail(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!(
                "MockProvider: no response registered for {}",
                params.search_term
            )),
        }
    }
}
