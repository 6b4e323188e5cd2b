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


use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use feestimi_contracts::ormp::IMessageLine;
use feestimi_provider::{EvmProviders, ProviderError, TransactionBuilder, TransactionRequest};
#[cfg(feature = "test-utils")]
use mockall::automock;

use crate::RemoteCallError;

/// Quotes message fees from a line contract on the source chain
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait FeeCaller: Send + Sync + 'static {
    /// Call `fee(toChainId, toAddress, fullPayload, params)` on `source_line`
    async fn quote_fee(
        &self,
        source_chain_id: u64,
        source_line: Address,
        to_chain_id: u64,
        to_address: Address,
        full_payload: Bytes,
        params: Bytes,
    ) -> Result<U256, RemoteCallError>;
}

/// Fee caller using a read-only `eth_call`
pub struct ContractFeeCaller {
    providers: EvmProviders,
}

impl ContractFeeCaller {
    /// Create a new fee caller over the given chain providers
    pub fn new(providers: EvmProviders) -> Self {
        Self { providers }
    }
}

#[async_trait::async_trait]
impl FeeCaller for ContractFeeCaller {
    async fn quote_fee(
        &self,
        source_chain_id: u64,
        source_line: Address,
        to_chain_id: u64,
        to_address: Address,
        full_payload: Bytes,
        params: Bytes,
    ) -> Result<U256, RemoteCallError> {
        let provider = self
            .providers
            .get(source_chain_id)
            .ok_or(RemoteCallError::NoProvider(source_chain_id))?;

        let call = IMessageLine::feeCall {
            toChainId: U256::from(to_chain_id),
            toDapp: to_address,
            message: full_payload,
            params,
        };
        let tx = TransactionRequest::default()
            .with_to(source_line)
            .with_input(call.abi_encode());

        let ret = provider
            .call(tx, None)
            .await
            .map_err(RemoteCallError::provider(source_chain_id))?;

        IMessageLine::feeCall::abi_decode_returns(&ret)
            .map_err(ProviderError::from)
            .map_err(RemoteCallError::provider(source_chain_id))
    }
}
