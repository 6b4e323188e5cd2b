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
    task::{Context, Poll},
    time::Duration,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::{TransportError, TransportFut};
use tower::{Layer, Service};

/// Layer that bounds each JSON-RPC request by a client side timeout
#[derive(Debug, Clone)]
pub(crate) struct ProviderTimeoutLayer {
    timeout: Duration,
}

impl ProviderTimeoutLayer {
    pub(crate) fn new(timeout: Duration) -> Self {
        ProviderTimeoutLayer { timeout }
    }
}

impl<S> Layer<S> for ProviderTimeoutLayer
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError> + Sync,
{
    type Service = ProviderTimeout<S>;

    fn layer(&self, service: S) -> Self::Service {
        ProviderTimeout::new(service, self.timeout)
    }
}

/// Client side timeout around a JSON-RPC transport
#[derive(Debug, Clone)]
pub(crate) struct ProviderTimeout<S> {
    service: S,
    timeout: Duration,
}

impl<S> ProviderTimeout<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError> + Sync,
{
    /// Creates a new [`ProviderTimeout`]
    pub(crate) const fn new(service: S, timeout: Duration) -> Self {
        ProviderTimeout { service, timeout }
    }
}

impl<S> Service<RequestPacket> for ProviderTimeout<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Sync
        + Send
        + Clone
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = TransportFut<'static>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let response = self.service.call(request);
        let timeout = self.timeout;
        Box::pin(async move {
            tokio::time::timeout(timeout, response)
                .await
                .unwrap_or_else(|_| {
                    tracing::warn!("chain rpc request timed out after {timeout:?}");
                    Err(TransportError::local_usage_str(&format!(
                        "request timed out after {timeout:?}"
                    )))
                })
        })
    }
}
