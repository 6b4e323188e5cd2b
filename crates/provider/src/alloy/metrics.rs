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


use std::task::{Context, Poll};

use alloy_json_rpc::{RequestPacket, ResponsePacket, ResponsePayload, RpcError};
use alloy_transport::{TransportError, TransportFut};
use feestimi_utils::metrics::MethodSessionLogger;
use tower::{Layer, Service};

const SERVICE_NAME: &str = "alloy_provider_client";

/// Alloy provider metric layer.
#[derive(Default)]
pub(crate) struct AlloyMetricLayer {}

impl<S> Layer<S> for AlloyMetricLayer
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError> + Sync,
{
    type Service = AlloyMetricMiddleware<S>;

    fn layer(&self, service: S) -> Self::Service {
        AlloyMetricMiddleware::new(service)
    }
}

/// Records per-method request metrics for the wrapped transport.
#[derive(Clone)]
pub(crate) struct AlloyMetricMiddleware<S> {
    service: S,
}

impl<S> AlloyMetricMiddleware<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError> + Sync,
{
    /// Wrap a transport service
    pub(crate) fn new(service: S) -> Self {
        Self { service }
    }
}

impl<S> Service<RequestPacket> for AlloyMetricMiddleware<S>
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
        let session = MethodSessionLogger::start(SERVICE_NAME, method_name(&request));
        let mut svc = self.service.clone();
        Box::pin(async move {
            let response = svc.call(request).await;
            session.done(response_status(&response));
            response
        })
    }
}

fn method_name(req: &RequestPacket) -> String {
    match req {
        RequestPacket::Single(request) => request.method().to_string(),
        // can't extract method name for batch.
        RequestPacket::Batch(_) => "batch".to_string(),
    }
}

fn response_status(response: &Result<ResponsePacket, TransportError>) -> &'static str {
    match response {
        Ok(ResponsePacket::Single(resp)) => payload_status(&resp.payload),
        Ok(ResponsePacket::Batch(resps)) => resps
            .first()
            .map(|resp| payload_status(&resp.payload))
            .unwrap_or("success"),
        Err(RpcError::ErrorResp(_)) => "rpc_error",
        Err(RpcError::NullResp) => "null_response",
        Err(RpcError::LocalUsageError(_)) => "local_error",
        Err(RpcError::DeserError { .. }) | Err(RpcError::SerError(_)) => "serde_error",
        Err(RpcError::Transport(_)) => "transport_error",
        Err(_) => "other_error",
    }
}

fn payload_status<T, E>(payload: &ResponsePayload<T, E>) -> &'static str {
    match payload {
        ResponsePayload::Success(_) => "success",
        ResponsePayload::Failure(err) => match err.code {
            -32700 => "parse_error",
            -32600 => "invalid_request",
            -32601 => "method_not_found",
            -32602 => "invalid_params",
            -32603 => "internal_error",
            // execution reverted
            3 => "reverted",
            x if (-32099..=-32000).contains(&x) => "server_error",
            _ => "other_error",
        },
    }
}
