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


use std::sync::Arc;

use anyhow::Context;
use clap::{builder::PossibleValuesParser, Args, Parser, Subcommand};

mod deployment;
mod estimate;
mod metrics;
mod server;
mod tracing;

use estimate::EstimateArgs;
use feestimi_estimator::{ContractFeeCaller, FeeEstimator, FeeEstimatorImpl, SimulationGasEstimator};
use feestimi_provider::EvmProviders;
use feestimi_types::deployment::DeploymentSpec;
use server::ServerArgs;

/// Main entry point for the CLI
///
/// Parses the CLI arguments, loads the deployment and runs the subcommand.
/// The server runs until a ctrl-c signal is received.
pub async fn run() -> anyhow::Result<()> {
    let opt = Cli::parse();
    let _guard = tracing::configure_logging(&opt.logs)?;

    let deployment = deployment::resolve_deployment(&opt.common.network, &opt.common.deployment)?;
    tracing::info!(
        "Deployment chains: {:?}",
        deployment
            .chains
            .iter()
            .map(|(name, chain)| (name.as_str(), chain.id))
            .collect::<Vec<_>>()
    );

    // estimator metrics bind to the recorder installed when it is built
    if let Command::Server(_) = &opt.command {
        let metrics_addr = format!("{}:{}", opt.metrics.host, opt.metrics.port).parse()?;
        metrics::initialize(metrics_addr, &opt.metrics.tags, &opt.metrics.buckets)
            .context("metrics server should start")?;
    }

    let estimator = build_estimator(&deployment, opt.common.provider_client_timeout_seconds)?;

    match opt.command {
        Command::Server(args) => server::run(args, &deployment, estimator).await?,
        Command::Estimate(args) => estimate::run(args, estimator.as_ref()).await?,
    }

    tracing::info!("Shutdown, goodbye");
    Ok(())
}

fn build_estimator(
    deployment: &DeploymentSpec,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<Arc<dyn FeeEstimator>> {
    let registry = deployment
        .address_registry()
        .context("invalid line configuration")?;
    let providers = EvmProviders::connect(&deployment.chains, provider_client_timeout_seconds)?;

    Ok(Arc::new(FeeEstimatorImpl::new(
        Arc::new(registry),
        SimulationGasEstimator::new(providers.clone()),
        ContractFeeCaller::new(providers),
    )))
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Command {
    /// Server command
    ///
    /// Runs the HTTP estimation server
    #[command(name = "server")]
    Server(ServerArgs),

    /// Estimate command
    ///
    /// Quotes a single message fee and exits
    #[command(name = "estimate")]
    Estimate(EstimateArgs),
}

/// CLI common options
#[derive(Debug, Args)]
#[command(next_help_heading = "Common")]
pub struct CommonArgs {
    /// Network flag
    ///
    /// Loads a built-in deployment
    #[arg(
        long = "network",
        name = "network",
        env = "NETWORK",
        value_parser = PossibleValuesParser::new(deployment::HARDCODED_DEPLOYMENTS),
        global = true)
    ]
    network: Option<String>,

    /// Deployment file path
    ///
    /// Overrides values of the network deployment
    #[arg(
        long = "deployment",
        name = "deployment",
        env = "DEPLOYMENT",
        global = true
    )]
    deployment: Option<String>,

    /// Timeout for a single JSON-RPC request to a chain
    #[arg(
        long = "provider_client_timeout_seconds",
        name = "provider_client_timeout_seconds",
        env = "PROVIDER_CLIENT_TIMEOUT_SECONDS",
        default_value = "10",
        global = true
    )]
    provider_client_timeout_seconds: u64,
}

/// CLI options for the metrics server
#[derive(Debug, Args)]
#[command(next_help_heading = "Metrics")]
pub struct MetricsArgs {
    /// Port to listen on for metrics requests
    #[arg(
        long = "metrics.port",
        name = "metrics.port",
        env = "METRICS_PORT",
        default_value = "8080",
        global = true
    )]
    port: u16,

    /// Host to listen on for metrics requests
    #[arg(
        long = "metrics.host",
        name = "metrics.host",
        env = "METRICS_HOST",
        default_value = "0.0.0.0",
        global = true
    )]
    host: String,

    /// Tags for metrics
    ///
    /// Format: key1=value1,key2=value2,...
    #[arg(
        long = "metrics.tags",
        name = "metrics.tags",
        env = "METRICS_TAGS",
        default_values_t = Vec::<String>::new(),
        value_delimiter = ',',
        global = true
    )]
    tags: Vec<String>,

    /// Bucket for histogram metric.
    #[arg(
        long = "metrics.histogram_buckets",
        name = "metrics.histogram_buckets",
        env = "METRICS_HISTOGRAM_BUCKETS",
        default_values_t = vec![
            // Exponential buckets from 0 to 256
            0.0, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 128.0, 256.0,
            // Remote calls from 500 to 20,000
            500.0, 1000.0, 2000.0, 5000.0, 10000.0, 20000.0,
        ],
        value_delimiter = ',',
        global = true
    )]
    buckets: Vec<f64>,
}

/// CLI options for logging
#[derive(Debug, Args)]
#[command(next_help_heading = "Logging")]
pub struct LogsArgs {
    /// Log file
    ///
    /// If not provided, logs will be written to stdout
    #[arg(
        long = "log.file",
        name = "log.file",
        env = "LOG_FILE",
        default_value = None,
        global = true
    )]
    file: Option<String>,

    /// Log JSON
    ///
    /// If set, logs will be written in JSON format
    #[arg(
        long = "log.json",
        name = "log.json",
        env = "LOG_JSON",
        required = false,
        num_args = 0,
        global = true
    )]
    json: bool,
}

/// CLI options
#[derive(Debug, Parser)]
#[command(name = "feestimi", version, about = "Cross-chain message fee estimation")]
pub struct Cli {
    #[clap(subcommand)]
    command: Command,

    #[clap(flatten)]
    common: CommonArgs,

    #[clap(flatten)]
    metrics: MetricsArgs,

    #[clap(flatten)]
    logs: LogsArgs,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use metrics_util::debugging::DebuggingRecorder;

    use super::*;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_server() {
        let cli = Cli::try_parse_from([
            "feestimi",
            "--network",
            "testnet",
            "server",
            "--rpc.port",
            "4000",
            "--metrics.tags",
            "env=test,region=eu",
        ])
        .unwrap();
        assert_eq!(cli.common.network.as_deref(), Some("testnet"));
        assert_eq!(cli.metrics.tags, vec!["env=test", "region=eu"]);
        assert!(matches!(cli.command, Command::Server(_)));
    }

    #[tokio::test]
    async fn test_estimator_metrics_use_installed_recorder() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        let deployment = deployment::resolve_deployment(&Some("testnet".to_owned()), &None).unwrap();
        ::metrics::with_local_recorder(&recorder, || build_estimator(&deployment, 1)).unwrap();

        let names = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(key, _, _, _)| key.key().name().to_owned())
            .collect::<Vec<_>>();
        assert!(names.iter().any(|n| n.ends_with("fee_estimations")), "{names:?}");
        assert!(names.iter().any(|n| n.ends_with("estimate_fee_ms")), "{names:?}");
    }

    #[test]
    fn test_parse_unknown_network() {
        assert!(Cli::try_parse_from(["feestimi", "--network", "mainnet", "server"]).is_err());
    }

    #[test]
    fn test_parse_estimate() {
        let cli = Cli::try_parse_from([
            "feestimi",
            "estimate",
            "ormp",
            "--from_chain_id",
            "43",
            "--to_chain_id",
            "421613",
            "--payload",
            "0x1234",
            "--from_address",
            "0x0000000000000000000000000000000000000001",
            "--to_address",
            "0x0000000000000000000000000000000000000002",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Estimate(_)));
    }
}
