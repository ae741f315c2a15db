use axum::{extract::State, Extension, Json};
use specimap_core::{ResultBundle, SearchDescriptor};
use specimap_inat::InatError;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// POST body is the search descriptor: `{specimenName, coordinate,
/// searchOptions}`. Any missing field is a 400 — the "empty query" shortcut
/// only applies to a present-but-blank specimen name, which yields an empty
/// bundle with a 200.
pub(super) async fn search_observations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<ResultBundle>>, ApiError> {
    let descriptor: SearchDescriptor = serde_json::from_value(body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting malformed search body");
        ApiError::new(req_id.0.clone(), "bad_request", "Invalid input")
    })?;

    let bundle = state
        .client
        .fetch_specimen_observations(&descriptor)
        .await
        .map_err(|e| map_fetch_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: bundle,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_fetch_error(request_id: String, error: &InatError) -> ApiError {
    match error {
        InatError::InvalidQuery(reason) => {
            tracing::debug!(reason = %reason, "rejecting invalid query");
            ApiError::new(request_id, "bad_request", reason.clone())
        }
        InatError::Http(_) | InatError::Deserialize { .. } => {
            tracing::error!(error = %error, "upstream observation fetch failed");
            ApiError::new(
                request_id,
                "upstream_error",
                "upstream observation fetch failed",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use specimap_inat::InatClient;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn state_for(base_url: &str) -> AppState {
        AppState {
            client: Arc::new(InatClient::with_base_url(30, base_url).unwrap()),
        }
    }

    fn req_id() -> Extension<RequestId> {
        Extension(RequestId("test-req".to_string()))
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "specimenName": "Poppy",
            "coordinate": {"lat": 39.35, "lng": -120.26},
            "searchOptions": {
                "radius": 75,
                "displayAmount": 20,
                "sinceDate": "",
                "beforeDate": "",
                "gradeType": "needs_id,research,casual",
                "useCurrentLocation": false
            }
        })
    }

    async fn mount_empty_upstream(server: &MockServer) {
        for p in ["/observations", "/observations/observers", "/observations/identifiers"] {
            Mock::given(method("GET"))
                .and(path(p))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
                .mount(server)
                .await;
        }
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let server = MockServer::start().await;
        let result = search_observations(
            State(state_for(&server.uri())),
            req_id(),
            Json(json!({ "specimenName": "Poppy" })),
        )
        .await;

        let err = result.err().expect("missing fields must be rejected");
        assert_eq!(err.error.code, "bad_request");
        assert_eq!(err.error.message, "Invalid input");
    }

    #[tokio::test]
    async fn valid_body_returns_bundle_envelope() {
        let server = MockServer::start().await;
        mount_empty_upstream(&server).await;

        let response = search_observations(
            State(state_for(&server.uri())),
            req_id(),
            Json(valid_body()),
        )
        .await
        .expect("valid body should succeed");

        assert_eq!(response.0.meta.request_id, "test-req");
        assert!(response.0.data.observations.is_empty());
        assert_eq!(response.0.data.leading_users.observers.len(), 10);
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/observations"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = search_observations(
            State(state_for(&server.uri())),
            req_id(),
            Json(valid_body()),
        )
        .await
        .err()
        .expect("upstream failure must surface");
        assert_eq!(err.error.code, "upstream_error");
    }
}
