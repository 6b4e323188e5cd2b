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


use std::{str::FromStr, sync::Arc, time::Instant};

use alloy_primitives::Bytes;
use feestimi_types::{AddressRegistry, AddressRole, EstimateFeeRequest, FeeQuote, Platform};
use feestimi_utils::log::LogOnError;
use metrics::{Counter, Histogram};
use metrics_derive::Metrics;
#[cfg(feature = "test-utils")]
use mockall::automock;
use tracing::Level;

use crate::{
    codec,
    line::{self, Line},
    EncodingError, FeeCaller, FeeEstimationError, GasEstimator,
};

/// Fee estimator trait
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait FeeEstimator: Send + Sync + 'static {
    /// Quote the fee of delivering a message, returning the fee and the
    /// params blob the quote was made with
    async fn estimate_fee(
        &self,
        request: EstimateFeeRequest,
    ) -> Result<FeeQuote, FeeEstimationError>;
}

/// Fee estimator implementation
pub struct FeeEstimatorImpl<G, F> {
    registry: Arc<AddressRegistry>,
    gas_estimator: G,
    fee_caller: F,
    metrics: Metrics,
}

#[derive(Metrics)]
#[metrics(scope = "fee_estimator")]
struct Metrics {
    #[metric(describe = "the count of fee estimation requests.")]
    fee_estimations: Counter,
    #[metric(describe = "the count of failed fee estimations.")]
    fee_estimation_errors: Counter,
    #[metric(describe = "the count of destination gas simulations.")]
    gas_simulations: Counter,
    #[metric(describe = "the distribution of fee estimation time.")]
    estimate_fee_ms: Histogram,
}

#[async_trait::async_trait]
impl<G: GasEstimator, F: FeeCaller> FeeEstimator for FeeEstimatorImpl<G, F> {
    async fn estimate_fee(
        &self,
        request: EstimateFeeRequest,
    ) -> Result<FeeQuote, FeeEstimationError> {
        let timer = Instant::now();
        self.metrics.fee_estimations.increment(1);
        tracing::info!(
            "estimating {} fee from chain {} to chain {}",
            request.platform,
            request.from_chain_id,
            request.to_chain_id
        );

        let context = format!(
            "{} fee estimation from chain {} to chain {} failed",
            request.platform, request.from_chain_id, request.to_chain_id
        );
        let ret = self.estimate(request).await;
        let level = match &ret {
            Err(FeeEstimationError::RemoteCall(_)) => Level::ERROR,
            _ => Level::WARN,
        };
        let ret = ret.log_on_error_level(level, context);

        if ret.is_err() {
            self.metrics.fee_estimation_errors.increment(1);
        }
        self.metrics
            .estimate_fee_ms
            .record(timer.elapsed().as_millis() as f64);
        ret
    }
}

impl<G, F> FeeEstimatorImpl<G, F>
where
    G: GasEstimator,
    F: FeeCaller,
{
    /// Create a new fee estimator
    pub fn new(registry: Arc<AddressRegistry>, gas_estimator: G, fee_caller: F) -> Self {
        Self {
            registry,
            gas_estimator,
            fee_caller,
            metrics: Metrics::default(),
        }
    }

    async fn estimate(&self, request: EstimateFeeRequest) -> Result<FeeQuote, FeeEstimationError> {
        let platform = Platform::from_str(&request.platform)
            .map_err(|_| FeeEstimationError::UnsupportedProtocol(request.platform.clone()))?;
        if platform.is_superseded() {
            tracing::warn!("{platform} is superseded and only kept for existing callers");
        }
        let line = line::line_for(platform);

        let source_line =
            self.registry
                .resolve(platform, request.from_chain_id, AddressRole::SourceLine)?;
        tracing::debug!(
            "{platform} source line on chain {}: {source_line}",
            request.from_chain_id
        );

        let from = codec::parse_address("from_address", &request.from_address)?;
        let to = codec::parse_address("to_address", &request.to_address)?;
        let message = codec::parse_bytes("payload", &request.payload)?;
        let full_payload = line.build_full_payload(from, to, &message);
        tracing::debug!("full payload: {full_payload}");

        let gas_limit = match request.extra.gas_limit {
            Some(gas_limit) => gas_limit,
            None => {
                self.simulate_gas_limit(line, request.to_chain_id, &full_payload)
                    .await?
            }
        };

        let params = line.build_params(gas_limit, from, &request.extra.args)?;
        tracing::debug!("params with gas limit {gas_limit}: {params}");

        let fee = self
            .fee_caller
            .quote_fee(
                request.from_chain_id,
                source_line,
                request.to_chain_id,
                to,
                full_payload,
                params.clone(),
            )
            .await?;
        tracing::debug!("{platform} fee from chain {}: {fee}", request.from_chain_id);

        Ok(FeeQuote::new(fee, params))
    }

    async fn simulate_gas_limit(
        &self,
        line: &dyn Line,
        to_chain_id: u64,
        full_payload: &Bytes,
    ) -> Result<i128, FeeEstimationError> {
        let platform = line.platform();
        if !line.estimates_gas() {
            return Err(EncodingError::MissingGasLimit(platform).into());
        }

        let endpoint =
            self.registry
                .resolve(platform, to_chain_id, AddressRole::DestinationEndpoint)?;
        let dest_line = self
            .registry
            .resolve(platform, to_chain_id, AddressRole::DestinationLine)?;

        self.metrics.gas_simulations.increment(1);
        let gas = self
            .gas_estimator
            .estimate_gas(to_chain_id, endpoint, dest_line, full_payload.clone())
            .await?;
        tracing::debug!("simulated delivery on chain {to_chain_id} uses {gas} gas");

        Ok(i128::from(gas))
    }
}
