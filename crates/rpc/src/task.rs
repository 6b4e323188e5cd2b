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


use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use feestimi_estimator::FeeEstimator;
use feestimi_task::{server::format_socket_addr, Task};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{router, ApiState, ChainInfo};

/// HTTP server arguments.
#[derive(Debug, Clone)]
pub struct Args {
    /// Host to listen on.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Shared secret required in the `x-api-key` header, if any.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Chains listed by `GET /chains`.
    pub chains: Vec<ChainInfo>,
}

/// HTTP server task.
pub struct RpcTask {
    args: Args,
    estimator: Arc<dyn FeeEstimator>,
}

#[async_trait]
impl Task for RpcTask {
    async fn run(self: Box<Self>, shutdown_token: CancellationToken) -> anyhow::Result<()> {
        let addr: SocketAddr = format_socket_addr(&self.args.host, self.args.port)
            .parse()
            .context("should parse rpc listen address")?;
        tracing::info!("Starting rpc server on {}", addr);

        if self.args.api_key.is_none() {
            tracing::warn!("No api key configured, the rpc server accepts unauthenticated requests");
        }

        let state = ApiState::new(self.estimator, self.args.chains);
        let app = router(state, self.args.api_key, self.args.timeout);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("should bind rpc server to {addr}"))?;
        info!("Started RPC server");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_token.cancelled_owned())
            .await
            .context("rpc server failed")?;

        tracing::info!("Server shutdown");
        Ok(())
    }
}

impl RpcTask {
    /// Creates a new RPC server task.
    pub fn new(args: Args, estimator: Arc<dyn FeeEstimator>) -> Self {
        Self { args, estimator }
    }

    /// Converts the task into a boxed trait object.
    pub fn boxed(self) -> Box<dyn Task> {
        Box::new(self)
    }
}
