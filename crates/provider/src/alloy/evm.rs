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


use alloy_primitives::Bytes;
use alloy_provider::Provider as AlloyProvider;
use alloy_rpc_types_eth::{BlockId, TransactionRequest};

use crate::{EvmProvider, ProviderResult};

/// Evm Provider implementation using [alloy-provider](https://github.com/alloy-rs/alloy-rs)
#[derive(Clone)]
pub(crate) struct AlloyEvmProvider<AP> {
    inner: AP,
}

impl<AP> AlloyEvmProvider<AP> {
    /// Create a new `AlloyEvmProvider`
    pub(crate) fn new(inner: AP) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl<AP> EvmProvider for AlloyEvmProvider<AP>
where
    AP: AlloyProvider,
{
    async fn call(&self, tx: TransactionRequest, block: Option<BlockId>) -> ProviderResult<Bytes> {
        let mut call = self.inner.call(tx);
        if let Some(block) = block {
            call = call.block(block);
        }

        Ok(call.await?)
    }

    async fn estimate_gas(
        &self,
        tx: TransactionRequest,
        block: Option<BlockId>,
    ) -> ProviderResult<u64> {
        let mut call = self.inner.estimate_gas(tx);
        if let Some(block) = block {
            call = call.block(block);
        }

        Ok(call.await?)
    }
}
