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


use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{extract::MatchedPath, response::Response};
use feestimi_utils::metrics::MethodSessionLogger;
use http::Request;
use tower::{Layer, Service};

const SERVICE_NAME: &str = "http_server";

/// Layer recording per-route request metrics.
#[derive(Clone, Default)]
pub(crate) struct RequestMetricsLayer;

impl<S> Layer<S> for RequestMetricsLayer {
    type Service = RequestMetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestMetricsMiddleware { inner }
    }
}

/// Middleware recording count, latency and status of each route.
#[derive(Clone)]
pub(crate) struct RequestMetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody> Service<Request<ReqBody>> for RequestMetricsMiddleware<S>
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
        // route template, not the raw path
        let route = req
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_owned())
            .unwrap_or_else(|| "unmatched".to_owned());
        let session = MethodSessionLogger::start(SERVICE_NAME, route);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(req).await;
            match &response {
                Ok(resp) => session.done(resp.status().as_str()),
                Err(_) => session.done("error"),
            }
            response
        })
    }
}
