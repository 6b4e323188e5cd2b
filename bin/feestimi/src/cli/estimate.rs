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


use anyhow::Context;
use clap::Args;
use feestimi_estimator::FeeEstimator;
use feestimi_rpc::{ApiResponse, EstimateFeeQuery};

/// CLI options for a single fee estimate
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Platform to quote on, e.g. `ormp`
    platform: String,

    /// Source chain id
    #[arg(long = "from_chain_id")]
    from_chain_id: String,

    /// Destination chain id
    #[arg(long = "to_chain_id")]
    to_chain_id: String,

    /// Hex encoded message
    #[arg(long = "payload")]
    payload: String,

    /// Sending dapp address
    #[arg(long = "from_address")]
    from_address: String,

    /// Receiving dapp address
    #[arg(long = "to_address")]
    to_address: String,

    /// Destination gas limit, estimated by simulation if not set
    #[arg(long = "gas_limit")]
    gas_limit: Option<String>,

    /// JSON list of platform specific arguments, e.g. `["0x..refund"]`
    #[arg(long = "extra")]
    extra: Option<String>,
}

impl From<EstimateArgs> for EstimateFeeQuery {
    fn from(args: EstimateArgs) -> Self {
        Self {
            from_chain_id: Some(args.from_chain_id),
            to_chain_id: Some(args.to_chain_id),
            gas_limit: args.gas_limit,
            payload: Some(args.payload),
            from_address: Some(args.from_address),
            to_address: Some(args.to_address),
            extra: args.extra,
        }
    }
}

/// Estimate one fee and print it in the same envelope the HTTP API returns
pub async fn run(args: EstimateArgs, estimator: &dyn FeeEstimator) -> anyhow::Result<()> {
    let platform = args.platform.clone();
    let (request, warnings) = EstimateFeeQuery::from(args)
        .into_request(platform)
        .context("invalid estimate arguments")?;

    let quote = estimator
        .estimate_fee(request)
        .await
        .context("fee estimation failed")?;

    let response = ApiResponse::ok(quote).with_warnings(warnings);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
