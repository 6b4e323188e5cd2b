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


//! Shared-secret API key gate.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::response::{IntoResponse, Response};
use http::Request;
use tower::{Layer, Service};

use crate::ApiError;

/// Header carrying the API key
pub(crate) const API_KEY_HEADER: &str = "x-api-key";

/// Paths reachable without a key
const PUBLIC_PATHS: &[&str] = &["/health"];

/// Layer that creates ApiKeyMiddleware instances.
#[derive(Clone)]
pub(crate) struct ApiKeyLayer {
    api_key: Option<Arc<str>>,
}

impl ApiKeyLayer {
    /// Creates a new ApiKeyLayer. Without a key every request passes.
    pub(crate) fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.map(Arc::from),
        }
    }
}

impl<S> Layer<S> for ApiKeyLayer {
    type Service = ApiKeyMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyMiddleware {
            inner,
            api_key: self.api_key.clone(),
        }
    }
}

/// Middleware that rejects requests without the configured `x-api-key` header.
#[derive(Clone)]
pub(crate) struct ApiKeyMiddleware<S> {
    inner: S,
    api_key: Option<Arc<str>>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for ApiKeyMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if !is_authorized(self.api_key.as_deref(), &req) {
            tracing::debug!("rejected request to {} without a valid api key", req.uri().path());
            return Box::pin(async { Ok(ApiError::Unauthorized.into_response()) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

fn is_authorized<B>(api_key: Option<&str>, req: &Request<B>) -> bool {
    let Some(api_key) = api_key else {
        return true;
    };
    if PUBLIC_PATHS.contains(&req.uri().path()) {
        return true;
    }
    req.headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == api_key)
}
