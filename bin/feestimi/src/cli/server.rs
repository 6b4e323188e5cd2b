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

use clap::Args;
use feestimi_estimator::FeeEstimator;
use feestimi_rpc::{ChainInfo, RpcTask, RpcTaskArgs};
use feestimi_task::spawn_tasks_with_shutdown;
use feestimi_types::deployment::DeploymentSpec;

/// CLI options for the HTTP server
#[derive(Args, Debug)]
#[command(next_help_heading = "RPC")]
pub struct ServerArgs {
    /// Port to listen on for HTTP requests
    #[arg(
        long = "rpc.port",
        name = "rpc.port",
        env = "RPC_PORT",
        default_value = "3001"
    )]
    port: u16,

    /// Host to listen on for HTTP requests
    #[arg(
        long = "rpc.host",
        name = "rpc.host",
        env = "RPC_HOST",
        default_value = "0.0.0.0"
    )]
    host: String,

    /// Timeout for handling a single request
    #[arg(
        long = "rpc.timeout_seconds",
        name = "rpc.timeout_seconds",
        env = "RPC_TIMEOUT_SECONDS",
        default_value = "20"
    )]
    timeout_seconds: u64,

    /// Shared secret clients must send in the `x-api-key` header.
    ///
    /// If not set, every request is accepted.
    #[arg(
        long = "rpc.api_key",
        name = "rpc.api_key",
        env = "RPC_API_KEY",
        hide_env_values = true
    )]
    api_key: Option<String>,
}

impl ServerArgs {
    fn to_args(&self, deployment: &DeploymentSpec) -> RpcTaskArgs {
        let chains = deployment
            .chains
            .iter()
            .map(|(name, chain)| ChainInfo {
                id: chain.id,
                name: name.clone(),
            })
            .collect();

        RpcTaskArgs {
            host: self.host.clone(),
            port: self.port,
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            chains,
        }
    }
}

/// Serve the HTTP API until ctrl-c
pub async fn run(
    args: ServerArgs,
    deployment: &DeploymentSpec,
    estimator: Arc<dyn FeeEstimator>,
) -> anyhow::Result<()> {
    let task_args = args.to_args(deployment);

    spawn_tasks_with_shutdown(
        [RpcTask::new(task_args, estimator).boxed()],
        tokio::signal::ctrl_c(),
    )
    .await;

    Ok(())
}
