use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{debug, info};

use crate::models::{AppState, SearchRequest};
use crate::search::{build_query, encode_terms};
use crate::types::AppResult;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/search/", get(search))
        .with_state(state)
}

/// GET /search/ - structured keyword search
///
/// Responds with the upstream URL, a blank line, then the raw arXiv feed.
async fn search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let request = SearchRequest::from_pairs(&pairs).inspect_err(|e| {
        debug!(error = %e, "Rejected search request");
    })?;

    let query = build_query(
        &encode_terms(&request.keywords),
        request.limit,
        &encode_terms(&request.negatives),
        request.start,
    );
    let url = state.arxiv.upstream_url(&query)?;
    info!(
        keywords = request.keywords.len(),
        negatives = request.negatives.len(),
        limit = request.limit,
        start = request.start,
        "Relaying structured search"
    );

    let upstream = state.arxiv.fetch(url.clone()).await?;
    let body = format!("{}\n\n{}", url, upstream.body);

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}
