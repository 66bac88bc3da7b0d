//! Aggregation handler: GET /numbers

use super::candidate_urls;
use crate::api::AppState;
use crate::types::NumberSet;
use axum::{
    Json,
    extract::{RawQuery, State},
};

/// GET /numbers - Merge integer lists from the given URLs
///
/// Always answers 200; unusable URLs and failing upstreams only shrink the list.
#[utoipa::path(
    get,
    path = "/numbers",
    tag = "numbers",
    params(
        ("u" = Vec<String>, Query, description = "Upstream URL returning {\"numbers\": [..]}; repeat for several sources")
    ),
    responses(
        (status = 200, description = "Sorted unique numbers from every upstream that answered in time", body = NumberSet)
    )
)]
pub async fn get_numbers(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<NumberSet> {
    let candidates = candidate_urls(query.as_deref());
    Json(state.aggregator.aggregate(&candidates).await)
}
