//! Route handlers for the REST API
//!
//! - [`numbers`] — the aggregation endpoint
//! - [`system`] — usage text, health, OpenAPI

mod numbers;
mod system;

pub use numbers::*;
pub use system::*;

/// Query parameter carrying candidate URLs; may repeat
pub const URL_PARAM: &str = "u";

/// Every value of the repeatable [`URL_PARAM`] in a raw query string, in order
///
/// Serde-based query extraction keeps only one value per key, so the raw query
/// is decoded directly.
pub fn candidate_urls(raw_query: Option<&str>) -> Vec<String> {
    raw_query
        .map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .filter(|(key, _)| key == URL_PARAM)
                .map(|(_, value)| value.into_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_repeated_value_in_order() {
        let query = "u=http://a.example/primes&x=1&u=http%3A%2F%2Fb.example%2Ffibo%3Fn%3D3&u=dolor";
        assert_eq!(
            candidate_urls(Some(query)),
            vec![
                "http://a.example/primes".to_string(),
                "http://b.example/fibo?n=3".to_string(),
                "dolor".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_query_yields_no_candidates() {
        assert!(candidate_urls(None).is_empty());
        assert!(candidate_urls(Some("")).is_empty());
        assert!(candidate_urls(Some("url=http://a.example/")).is_empty());
    }
}
