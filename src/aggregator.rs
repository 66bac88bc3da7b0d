//! Request orchestration: validate, fetch, merge

use crate::config::FetchConfig;
use crate::error::Result;
use crate::fetcher::NumberFetcher;
use crate::types::NumberSet;
use crate::validator::validate_endpoints;
use std::time::Duration;
use tracing::{debug, info};

/// Turns a list of candidate URLs into one merged [`NumberSet`]
///
/// Cheap to share behind an `Arc`; every call to [`aggregate`](Self::aggregate)
/// runs its own fetch round with a fresh budget.
#[derive(Clone, Debug)]
pub struct NumberAggregator {
    fetcher: NumberFetcher,
    max_timeout: Duration,
}

impl NumberAggregator {
    /// Create an aggregator from the fetch settings
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: NumberFetcher::new(config)?,
            max_timeout: config.max_timeout,
        })
    }

    /// Validate `candidates`, fetch every valid endpoint and merge the results
    ///
    /// Always succeeds. Invalid candidates and failing endpoints only reduce what
    /// ends up in the set; with nothing usable the set is empty.
    pub async fn aggregate<S: AsRef<str>>(&self, candidates: &[S]) -> NumberSet {
        let endpoints = validate_endpoints(candidates);
        let valid = endpoints.len();

        let collected = self.fetcher.fetch_all(endpoints, self.max_timeout).await;
        debug!(numbers = ?collected, "merged upstream numbers");

        let set = NumberSet::from_unsorted(collected);
        debug!(numbers = ?set.as_slice(), "unique numbers");

        info!(
            candidates = candidates.len(),
            endpoints = valid,
            unique = set.len(),
            "numbers aggregated"
        );

        set
    }
}
