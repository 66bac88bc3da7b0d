//! Application state for the API server

use crate::{Config, NumberAggregator};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// Validates, fetches and merges for `/numbers`
    pub aggregator: Arc<NumberAggregator>,

    /// Configuration the router was built with
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(aggregator: Arc<NumberAggregator>, config: Arc<Config>) -> Self {
        Self { aggregator, config }
    }
}
