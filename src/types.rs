//! Core types: upstream endpoints and the merged number set

use crate::error::EndpointError;
use crate::merge::merge_unique;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use utoipa::ToSchema;

/// A validated absolute http/https URL, reduced to `scheme://host[:port]/path`
///
/// Query string, fragment and user-info are stripped during construction, so
/// nothing the caller appended can leak into the outbound request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint(Url);

impl Endpoint {
    /// Parse a single candidate string into an endpoint
    pub fn parse(candidate: &str) -> Result<Self, EndpointError> {
        let mut url = Url::parse(candidate).map_err(|source| EndpointError::Malformed {
            candidate: candidate.to_string(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(EndpointError::UnsupportedScheme {
                    candidate: candidate.to_string(),
                    scheme: other.to_string(),
                });
            }
        }

        url.set_query(None);
        url.set_fragment(None);
        // http(s) URLs always have a host, so clearing credentials cannot fail
        let _ = url.set_username("");
        let _ = url.set_password(None);

        Ok(Self(url))
    }

    /// The normalized URL as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The normalized URL
    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ascending, duplicate-free integers returned to the caller
///
/// Serializes as `{"numbers": [...]}`, the same shape upstream sources are
/// expected to produce.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NumberSet {
    /// Sorted unique integers collected from all upstream sources
    numbers: Vec<i64>,
}

impl NumberSet {
    /// Build a set from raw, possibly duplicated and unordered values
    pub fn from_unsorted(numbers: Vec<i64>) -> Self {
        Self {
            numbers: merge_unique(numbers),
        }
    }

    /// The sorted unique values
    pub fn as_slice(&self) -> &[i64] {
        &self.numbers
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Whether no upstream contributed anything
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}
