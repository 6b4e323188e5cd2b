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


use alloy_primitives::{Address, Bytes};
use feestimi_provider::{EvmProviders, TransactionBuilder, TransactionRequest};
#[cfg(feature = "test-utils")]
use mockall::automock;

use crate::RemoteCallError;

/// Estimates the gas a message delivery uses on the destination chain
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait GasEstimator: Send + Sync + 'static {
    /// Estimate the gas of `endpoint` calling `line` with `full_payload` on
    /// chain `to_chain_id`
    async fn estimate_gas(
        &self,
        to_chain_id: u64,
        endpoint: Address,
        line: Address,
        full_payload: Bytes,
    ) -> Result<u64, RemoteCallError>;
}

/// Gas estimator that simulates delivery with `eth_estimateGas`
pub struct SimulationGasEstimator {
    providers: EvmProviders,
}

impl SimulationGasEstimator {
    /// Create a new gas estimator over the given chain providers
    pub fn new(providers: EvmProviders) -> Self {
        Self { providers }
    }
}

#[async_trait::async_trait]
impl GasEstimator for SimulationGasEstimator {
    async fn estimate_gas(
        &self,
        to_chain_id: u64,
        endpoint: Address,
        line: Address,
        full_payload: Bytes,
    ) -> Result<u64, RemoteCallError> {
        let provider = self
            .providers
            .get(to_chain_id)
            .ok_or(RemoteCallError::NoProvider(to_chain_id))?;

        let tx = TransactionRequest::default()
            .with_from(endpoint)
            .with_to(line)
            .with_input(full_payload);

        provider
            .estimate_gas(tx, None)
            .await
            .map_err(RemoteCallError::provider(to_chain_id))
    }
}
