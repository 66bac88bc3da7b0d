//! Filtering of caller-supplied strings down to fetchable endpoints

use crate::types::Endpoint;
use tracing::debug;

/// Keep the candidates that are absolute http/https URLs, normalized
///
/// Rejected candidates are logged and dropped; they never fail the request.
/// Output order follows input order and duplicates are kept, since the merge
/// step deduplicates by value rather than by source.
pub fn validate_endpoints<S: AsRef<str>>(candidates: &[S]) -> Vec<Endpoint> {
    candidates
        .iter()
        .filter_map(|candidate| match Endpoint::parse(candidate.as_ref()) {
            Ok(endpoint) => Some(endpoint),
            Err(e) => {
                debug!(error = %e, "discarding candidate URL");
                None
            }
        })
        .collect()
}
