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


//! Trait for read-only access to an EVM chain.

use alloy_primitives::Bytes;
use alloy_rpc_types_eth::{BlockId, TransactionRequest};
#[cfg(feature = "test-utils")]
use mockall::automock;

use super::error::ProviderResult;

/// Trait for interacting with chain data and contracts.
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait EvmProvider: Send + Sync {
    /// Simulate a transaction via an eth_call
    async fn call(&self, tx: TransactionRequest, block: Option<BlockId>) -> ProviderResult<Bytes>;

    /// Estimate the gas a transaction would use via eth_estimateGas
    async fn estimate_gas(
        &self,
        tx: TransactionRequest,
        block: Option<BlockId>,
    ) -> ProviderResult<u64>;
}
