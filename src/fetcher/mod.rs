//! Concurrent fan-out of upstream requests under a shared deadline
//!
//! [`NumberFetcher::fetch_all`] spawns one task per endpoint. Every task gets its
//! own copy of the round's [`Budget`], the shared HTTP client and a sender for
//! its results. A task reads the remaining budget when it dispatches and uses it
//! as the request timeout; if nothing is left it does not send at all.
//!
//! The caller waits on all task handles before draining the result channel, so
//! the collection is only read once every writer is gone. Any failure of a
//! single endpoint is logged and contributes nothing.

use crate::budget::Budget;
use crate::config::FetchConfig;
use crate::error::{FetchError, Result};
use crate::types::Endpoint;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Body shape expected from every upstream endpoint
#[derive(Debug, Deserialize)]
struct UpstreamNumbers {
    numbers: Vec<i64>,
}

/// Fetches integer lists from many endpoints in parallel
#[derive(Clone, Debug)]
pub struct NumberFetcher {
    /// Shared client; cloning it shares the connection pool
    client: reqwest::Client,
}

impl NumberFetcher {
    /// Create a fetcher sending `Accept: application/json` and the configured user agent
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch every endpoint within `deadline`, returning all integers received
    ///
    /// The result is unordered and may contain duplicates. This never fails; an
    /// endpoint that errors or runs out of time simply contributes nothing.
    pub async fn fetch_all(&self, endpoints: Vec<Endpoint>, deadline: Duration) -> Vec<i64> {
        self.fetch_within(endpoints, Budget::start(deadline)).await
    }

    /// Like [`fetch_all`](Self::fetch_all) but against a budget that may already be running
    pub async fn fetch_within(&self, endpoints: Vec<Endpoint>, budget: Budget) -> Vec<i64> {
        if endpoints.is_empty() {
            return Vec::new();
        }

        let total = endpoints.len();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handles: Vec<_> = endpoints
            .into_iter()
            .map(|endpoint| tokio::spawn(fetch_task(self.client.clone(), endpoint, budget, tx.clone())))
            .collect();

        // Only task-owned senders remain, so the channel closes once the last task ends
        drop(tx);

        for joined in futures::future::join_all(handles).await {
            if let Err(e) = joined {
                warn!(error = %e, "fetch task did not complete");
            }
        }

        let mut numbers = Vec::new();
        let mut responded = 0usize;
        while let Some(batch) = rx.recv().await {
            responded += 1;
            numbers.extend(batch);
        }

        debug!(
            endpoints = total,
            responded,
            collected = numbers.len(),
            elapsed_ms = budget.elapsed().as_millis() as u64,
            budget_ms = budget.maximum().as_millis() as u64,
            exhausted = budget.is_exhausted(),
            "fetch round finished"
        );

        numbers
    }
}

/// One endpoint's worth of work; owns everything it touches
async fn fetch_task(
    client: reqwest::Client,
    endpoint: Endpoint,
    budget: Budget,
    results: mpsc::UnboundedSender<Vec<i64>>,
) {
    let started = Instant::now();

    match fetch_endpoint(&client, &endpoint, budget).await {
        Ok(numbers) => {
            debug!(
                endpoint = %endpoint,
                elapsed_ms = started.elapsed().as_millis() as u64,
                count = numbers.len(),
                "upstream responded"
            );
            // The receiver outlives every task, so a send can only fail if the
            // caller itself was dropped mid-round
            results.send(numbers).ok();
        }
        Err(e) if e.is_skip() => {
            debug!(
                endpoint = %endpoint,
                elapsed_ms = budget.elapsed().as_millis() as u64,
                "skipping endpoint, budget exhausted"
            );
        }
        Err(e) => {
            warn!(
                endpoint = %endpoint,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "upstream failed"
            );
        }
    }
}

/// A single GET bounded by whatever is left of `budget` right now
async fn fetch_endpoint(
    client: &reqwest::Client,
    endpoint: &Endpoint,
    budget: Budget,
) -> std::result::Result<Vec<i64>, FetchError> {
    let timeout = budget.dispatch_timeout().ok_or(FetchError::BudgetExhausted)?;

    let request = async {
        let response = client
            .get(endpoint.url().clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: UpstreamNumbers = response
            .json()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        Ok::<_, FetchError>(body.numbers)
    };

    tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| FetchError::Timeout(timeout))?
}
