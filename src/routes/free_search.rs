use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{debug, info};

use crate::models::{AppState, FreeSearchParams};
use crate::search::build_free_query;
use crate::types::{AppError, AppResult};

const DEFAULT_FEED_TYPE: &str = "application/atom+xml";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/freesearch", get(free_search))
        .route("/freesearch/", get(free_search))
        .with_state(state)
}

/// GET /freesearch/ - raw arXiv expression passthrough
///
/// `keywords`, `limit` and `negative` must all be present; their content is
/// forwarded as-is and only the upstream body is returned.
async fn free_search(
    State(state): State<AppState>,
    Query(params): Query<FreeSearchParams>,
) -> AppResult<Response> {
    let (Some(keywords), Some(limit), Some(negative)) =
        (params.keywords, params.limit, params.negative)
    else {
        debug!("Rejected free search request with missing parameters");
        return Err(AppError::InvalidRequest(
            "keywords, limit and negative parameters are required".to_string(),
        ));
    };

    let query = build_free_query(&keywords, &limit, &negative);
    let url = state.arxiv.upstream_url(&query)?;
    info!(query = %query, "Relaying free-form search");

    let upstream = state.arxiv.fetch(url).await?;
    let content_type = upstream
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_FEED_TYPE));

    Ok(([(header::CONTENT_TYPE, content_type)], upstream.body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{body::Body, http::{Request, StatusCode}};
    use mockito::Matcher;
    use tower::ServiceExt;

    async fn get(server: &mockito::ServerGuard, uri: &str) -> (StatusCode, String) {
        let config = Config::with_upstream(format!("{}/api/query", server.url()));
        let app = router(AppState::new(config).unwrap());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_any_missing_param_is_bad_request() {
        let server = mockito::Server::new_async().await;

        for uri in [
            "/freesearch/?limit=5&negative=au:smith",
            "/freesearch/?keywords=ti:electron&negative=au:smith",
            "/freesearch/?keywords=ti:electron&limit=5",
            "/freesearch/",
        ] {
            let (status, _) = get(&server, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        }
    }

    #[tokio::test]
    async fn test_forwards_exclude_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("search_query".into(), "ti:electron".into()),
                Matcher::UrlEncoded("max_results".into(), "5".into()),
                Matcher::UrlEncoded("exclude_fields".into(), "au:smith".into()),
            ]))
            .with_status(200)
            .with_body("<feed>electron</feed>")
            .create_async()
            .await;

        let (status, body) = get(
            &server,
            "/freesearch/?keywords=ti:electron&limit=5&negative=au:smith",
        )
        .await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<feed>electron</feed>");
    }

    #[tokio::test]
    async fn test_empty_negative_omits_exclude_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/query")
            .match_query(Matcher::Regex("^search_query=ti:electron&max_results=5$".into()))
            .with_status(200)
            .with_body("<feed/>")
            .create_async()
            .await;

        let (status, _) = get(&server, "/freesearch/?keywords=ti:electron&limit=5&negative=").await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let config = Config::with_upstream("http://127.0.0.1:1/api/query");
        let app = router(AppState::new(config).unwrap());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/freesearch/?keywords=ti:electron&limit=5&negative=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
