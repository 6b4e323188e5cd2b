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


use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use anyhow::Context;
use feestimi_types::deployment::ChainConfig;

use crate::{new_alloy_evm_provider, EvmProvider};

/// Providers of every configured chain, keyed by chain id.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone, Default)]
pub struct EvmProviders {
    providers: HashMap<u64, Arc<dyn EvmProvider>>,
}

impl EvmProviders {
    /// Wrap an existing set of providers
    pub fn new(providers: HashMap<u64, Arc<dyn EvmProvider>>) -> Self {
        Self { providers }
    }

    /// Connect an alloy provider to each named chain
    pub fn connect(
        chains: &BTreeMap<String, ChainConfig>,
        provider_client_timeout_seconds: u64,
    ) -> anyhow::Result<Self> {
        let mut providers: HashMap<u64, Arc<dyn EvmProvider>> = HashMap::new();
        for (name, chain) in chains {
            let provider = new_alloy_evm_provider(&chain.rpc_url, provider_client_timeout_seconds)
                .with_context(|| format!("should create provider for chain {name}"))?;
            providers.insert(chain.id, Arc::new(provider));
        }
        Ok(Self { providers })
    }

    /// Provider for a chain, if one is configured
    pub fn get(&self, chain_id: u64) -> Option<Arc<dyn EvmProvider>> {
        self.providers.get(&chain_id).cloned()
    }
}

impl FromIterator<(u64, Arc<dyn EvmProvider>)> for EvmProviders {
    fn from_iter<I: IntoIterator<Item = (u64, Arc<dyn EvmProvider>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
