// This file is part of Feestimi.
//
// Feestimi is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Feestimi is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Feestimi.
// If not, see https://www.gnu.org/licenses/.


use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    BoxError, Json, Router,
};
use feestimi_estimator::FeeEstimator;
use feestimi_types::FeeQuote;
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::trace::TraceLayer;

use crate::{
    auth::ApiKeyLayer, metrics::RequestMetricsLayer, ApiError, ApiResponse, ChainInfo,
    EstimateFeeQuery,
};

/// State shared by every route
#[derive(Clone)]
pub struct ApiState {
    estimator: Arc<dyn FeeEstimator>,
    chains: Arc<Vec<ChainInfo>>,
}

impl ApiState {
    /// Create the route state
    pub fn new(estimator: Arc<dyn FeeEstimator>, chains: Vec<ChainInfo>) -> Self {
        Self {
            estimator,
            chains: Arc::new(chains),
        }
    }
}

/// Build the API router
pub fn router(state: ApiState, api_key: Option<String>, timeout: Duration) -> Router {
    Router::new()
        .route("/:platform/estimate_fee", get(estimate_fee))
        .route("/chains", get(chains))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                    handle_middleware_error(err, timeout)
                }))
                .timeout(timeout),
        )
        .layer(ApiKeyLayer::new(api_key))
        .layer(RequestMetricsLayer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_middleware_error(err: BoxError, timeout: Duration) -> Response {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out after {timeout:?}");
        return ApiError::Timeout(timeout).into_response();
    }
    tracing::error!("unhandled middleware error: {err}");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

async fn estimate_fee(
    State(state): State<ApiState>,
    Path(platform): Path<String>,
    query: Result<Query<EstimateFeeQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<FeeQuote>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidParams(e.body_text()))?;
    let (request, warnings) = query.into_request(platform)?;
    let quote = state.estimator.estimate_fee(request).await?;
    Ok(Json(ApiResponse::ok(quote).with_warnings(warnings)))
}

async fn chains(State(state): State<ApiState>) -> Json<ApiResponse<Vec<ChainInfo>>> {
    Json(ApiResponse::ok(state.chains.as_ref().clone()))
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{bytes, U256};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use feestimi_estimator::{FeeEstimationError, MockFeeEstimator, RemoteCallError};
    use feestimi_types::EstimateFeeRequest;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::API_KEY_HEADER;

    const QUERY: &str = "from_chain_id=421613&to_chain_id=43&gas_limit=200000&payload=0x1234\
        &from_address=0x0000000000000000000000000000000000000001\
        &to_address=0x0000000000000000000000000000000000000002";

    fn app(estimator: MockFeeEstimator, api_key: Option<&str>) -> Router {
        let state = ApiState::new(
            Arc::new(estimator),
            vec![
                ChainInfo {
                    id: 421613,
                    name: "arbitrum-goerli".to_owned(),
                },
                ChainInfo {
                    id: 43,
                    name: "pangoro".to_owned(),
                },
            ],
        );
        router(state, api_key.map(str::to_owned), Duration::from_secs(5))
    }

    struct SlowEstimator(Duration);

    #[async_trait::async_trait]
    impl FeeEstimator for SlowEstimator {
        async fn estimate_fee(
            &self,
            _request: EstimateFeeRequest,
        ) -> Result<FeeQuote, FeeEstimationError> {
            tokio::time::sleep(self.0).await;
            Ok(FeeQuote::new(U256::from(1), bytes!("01")))
        }
    }

    fn no_estimates() -> MockFeeEstimator {
        let mut estimator = MockFeeEstimator::new();
        estimator.expect_estimate_fee().times(0);
        estimator
    }

    async fn get(app: Router, uri: &str, api_key: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(key) = api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_estimate_fee() {
        let mut estimator = MockFeeEstimator::new();
        estimator
            .expect_estimate_fee()
            .withf(|r| {
                r.platform == "ormp"
                    && r.from_chain_id == 421613
                    && r.to_chain_id == 43
                    && r.extra.gas_limit == Some(200_000)
            })
            .times(1)
            .returning(|_| Ok(FeeQuote::new(U256::from(123456789), bytes!("abcd"))));

        let (status, body) = get(
            app(estimator, None),
            &format!("/ormp/estimate_fee?{QUERY}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "code": 0, "data": ["123456789", "0xabcd"] }));
    }

    #[tokio::test]
    async fn test_missing_param() {
        let (status, body) = get(
            app(no_estimates(), None),
            "/ormp/estimate_fee?from_chain_id=421613",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 1);
        assert_eq!(body["error"], "to_chain_id is required");
    }

    #[tokio::test]
    async fn test_estimation_errors() {
        let mut estimator = MockFeeEstimator::new();
        estimator
            .expect_estimate_fee()
            .times(1)
            .returning(|r| Err(FeeEstimationError::UnsupportedProtocol(r.platform)));
        let (status, body) = get(
            app(estimator, None),
            &format!("/unknown/estimate_fee?{QUERY}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 2);
        assert_eq!(body["error"], "unsupported protocol: unknown");

        let mut estimator = MockFeeEstimator::new();
        estimator
            .expect_estimate_fee()
            .times(1)
            .returning(|_| Err(RemoteCallError::NoProvider(421613).into()));
        let (status, body) = get(
            app(estimator, None),
            &format!("/ormp/estimate_fee?{QUERY}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 5);
    }

    #[tokio::test]
    async fn test_timeout_uses_error_envelope() {
        let state = ApiState::new(Arc::new(SlowEstimator(Duration::from_secs(10))), vec![]);
        let app = router(state, None, Duration::from_millis(50));

        let (status, body) = get(app, &format!("/ormp/estimate_fee?{QUERY}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 5);
        assert_eq!(body["error"], "request timed out after 50ms");
    }

    #[tokio::test]
    async fn test_fast_request_within_timeout() {
        let state = ApiState::new(Arc::new(SlowEstimator(Duration::from_millis(1))), vec![]);
        let app = router(state, None, Duration::from_secs(5));

        let (status, body) = get(app, &format!("/ormp/estimate_fee?{QUERY}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!(["1", "0x01"]));
    }

    #[tokio::test]
    async fn test_rejected_requests_are_counted() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let _guard = ::metrics::set_default_local_recorder(&recorder);

        let (status, _) = get(app(no_estimates(), Some("secret")), "/chains", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let statuses = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(key, _, _, value)| {
                let key = key.key();
                if !key.name().ends_with("response_status") {
                    return None;
                }
                let label = |name: &str| {
                    key.labels()
                        .find(|l| l.key() == name)
                        .map(|l| l.value().to_owned())
                };
                match value {
                    DebugValue::Counter(n) => Some((label("method_name")?, label("status")?, n)),
                    _ => None,
                }
            })
            .collect::<Vec<_>>();
        assert_eq!(statuses, vec![("/chains".to_owned(), "401".to_owned(), 1)]);
    }

    #[tokio::test]
    async fn test_malformed_extra_warns() {
        let mut estimator = MockFeeEstimator::new();
        estimator
            .expect_estimate_fee()
            .withf(|r| r.extra.args.is_empty())
            .times(1)
            .returning(|_| Ok(FeeQuote::new(U256::from(1), bytes!("01"))));

        let (status, body) = get(
            app(estimator, None),
            &format!("/ormp/estimate_fee?{QUERY}&extra=not-json"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 0);
        assert_eq!(body["warnings"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_chains_and_health() {
        let (status, body) = get(app(no_estimates(), None), "/chains", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "code": 0,
                "data": [
                    { "id": 421613, "name": "arbitrum-goerli" },
                    { "id": 43, "name": "pangoro" },
                ]
            })
        );

        let response = app(no_estimates(), None)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_api_key() {
        let (status, body) = get(app(no_estimates(), Some("secret")), "/chains", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], 6);

        let (status, _) = get(
            app(no_estimates(), Some("secret")),
            "/chains",
            Some("wrong"),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = get(
            app(no_estimates(), Some("secret")),
            "/chains",
            Some("secret"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get(app(no_estimates(), Some("secret")), "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
