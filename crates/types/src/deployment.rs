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


//! Deployment description: the chains the service talks to and the contracts
//! each platform has deployed on them.
//!
//! Chains are keyed by a lowercase name and line tables refer to chains by that
//! name, so every value has a stable path for configuration overrides, e.g.
//! `chains.pangoro.rpc_url` or `lines.ormp.source_lines.pangoro`.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    str::FromStr,
};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{AddressRegistry, AddressRole, AddressTable, LineAddresses, Platform};

/// Chains and line contracts of one deployment
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DeploymentSpec {
    /// Chains with an RPC endpoint, keyed by name
    #[serde(default)]
    pub chains: BTreeMap<String, ChainConfig>,
    /// Address tables keyed by platform name
    #[serde(default)]
    pub lines: BTreeMap<String, LineSpec>,
}

/// A chain the service can call
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChainConfig {
    /// Chain id
    pub id: u64,
    /// HTTP JSON-RPC endpoint
    pub rpc_url: String,
}

/// Address tables of one platform, keyed by chain name
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LineSpec {
    /// Entry contracts quoted on source chains
    #[serde(default)]
    pub source_lines: BTreeMap<String, Address>,
    /// Line contracts receiving messages on destination chains
    #[serde(default)]
    pub destination_lines: BTreeMap<String, Address>,
    /// Endpoints calling the line on destination chains
    #[serde(default)]
    pub destination_endpoints: BTreeMap<String, Address>,
}

/// Invalid deployment description
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeploymentError {
    /// A chain id of zero
    #[error("chain {0} must have a non-zero id")]
    ZeroChainId(String),
    /// Two chain names with the same id
    #[error("chain id {0} is configured more than once")]
    DuplicateChain(u64),
    /// Line tables for a platform that does not exist
    #[error("unknown platform {0:?} in line configuration")]
    UnknownPlatform(String),
    /// A line table refers to a chain that is not configured
    #[error("{platform} {role} table refers to unknown chain {chain:?}")]
    UnknownChain {
        /// Platform of the table
        platform: Platform,
        /// Role of the table
        role: AddressRole,
        /// Chain name
        chain: String,
    },
}

impl DeploymentSpec {
    /// Check the chain list for zero and duplicate ids
    pub fn validate_chains(&self) -> Result<(), DeploymentError> {
        let mut seen = HashSet::new();
        for (name, chain) in &self.chains {
            if chain.id == 0 {
                return Err(DeploymentError::ZeroChainId(name.clone()));
            }
            if !seen.insert(chain.id) {
                return Err(DeploymentError::DuplicateChain(chain.id));
            }
        }
        Ok(())
    }

    /// Build the immutable address registry described by `lines`
    pub fn address_registry(&self) -> Result<AddressRegistry, DeploymentError> {
        self.validate_chains()?;

        let mut lines = HashMap::new();
        for (key, line) in &self.lines {
            let platform = parse_platform_key(key)
                .ok_or_else(|| DeploymentError::UnknownPlatform(key.clone()))?;
            lines.insert(platform, self.line_addresses(platform, line)?);
        }
        Ok(AddressRegistry::new(lines))
    }

    /// Chain id of a configured chain name
    pub fn chain_id(&self, name: &str) -> Option<u64> {
        self.chains.get(name).map(|c| c.id)
    }

    fn line_addresses(
        &self,
        platform: Platform,
        line: &LineSpec,
    ) -> Result<LineAddresses, DeploymentError> {
        Ok(LineAddresses {
            source_lines: self.table(platform, AddressRole::SourceLine, &line.source_lines)?,
            destination_lines: self.table(
                platform,
                AddressRole::DestinationLine,
                &line.destination_lines,
            )?,
            destination_endpoints: self.table(
                platform,
                AddressRole::DestinationEndpoint,
                &line.destination_endpoints,
            )?,
        })
    }

    fn table(
        &self,
        platform: Platform,
        role: AddressRole,
        entries: &BTreeMap<String, Address>,
    ) -> Result<AddressTable, DeploymentError> {
        entries
            .iter()
            .map(|(chain, address)| {
                self.chain_id(chain)
                    .map(|id| (id, *address))
                    .ok_or_else(|| DeploymentError::UnknownChain {
                        platform,
                        role,
                        chain: chain.clone(),
                    })
            })
            .collect()
    }
}

/// Platform keys may use `_` in place of `-`, environment variable names cannot carry `-`
fn parse_platform_key(key: &str) -> Option<Platform> {
    Platform::from_str(&key.replace('_', "-")).ok()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use serde_json::json;

    use super::*;

    fn deployment(lines: serde_json::Value) -> DeploymentSpec {
        serde_json::from_value(json!({
            "chains": {
                "pangoro": { "id": 43, "rpc_url": "http://localhost:8545" },
                "arbitrum_goerli": { "id": 421613, "rpc_url": "http://localhost:8546" },
            },
            "lines": lines,
        }))
        .unwrap()
    }

    #[test]
    fn test_build_registry() {
        let deployment = deployment(json!({
            "ormp_legacy": {
                "source_lines": {
                    "pangoro": "0x0000000000BD9dcFDa5C60697039E2b3B28b079b",
                    "arbitrum_goerli": "0x0000000000BD9dcFDa5C60697039E2b3B28b079b",
                },
            },
            "ormp": {
                "destination_lines": { "pangoro": "0x00000000000000000000000000000000000000b2" },
            },
        }));
        let registry = deployment.address_registry().unwrap();
        assert_eq!(
            registry.resolve(Platform::OrmpLegacy, 421613, AddressRole::SourceLine),
            Ok(address!("0000000000BD9dcFDa5C60697039E2b3B28b079b"))
        );
        assert_eq!(
            registry.resolve(Platform::Ormp, 43, AddressRole::DestinationLine),
            Ok(address!("00000000000000000000000000000000000000b2"))
        );
        assert!(registry
            .resolve(Platform::OrmpLegacy, 43, AddressRole::DestinationLine)
            .is_err());
    }

    #[test]
    fn test_platform_keys() {
        assert_eq!(parse_platform_key("ormp-legacy"), Some(Platform::OrmpLegacy));
        assert_eq!(parse_platform_key("ormp_legacy"), Some(Platform::OrmpLegacy));
        assert_eq!(parse_platform_key("layerzero"), None);

        let deployment = deployment(json!({ "layerzero": {} }));
        assert_eq!(
            deployment.address_registry().unwrap_err(),
            DeploymentError::UnknownPlatform("layerzero".to_owned())
        );
    }

    #[test]
    fn test_unknown_chain() {
        let deployment = deployment(json!({
            "ormp": {
                "destination_endpoints": {
                    "crab": "0x0000000000000000000000000000000000000001",
                },
            },
        }));
        assert_eq!(
            deployment.address_registry().unwrap_err(),
            DeploymentError::UnknownChain {
                platform: Platform::Ormp,
                role: AddressRole::DestinationEndpoint,
                chain: "crab".to_owned(),
            }
        );
    }

    #[test]
    fn test_invalid_chains() {
        let mut deployment = deployment(json!({}));
        deployment.chains.insert(
            "pangoro_copy".to_owned(),
            ChainConfig {
                id: 43,
                rpc_url: "http://localhost:8547".to_owned(),
            },
        );
        assert_eq!(
            deployment.validate_chains(),
            Err(DeploymentError::DuplicateChain(43))
        );

        deployment.chains.remove("pangoro_copy");
        deployment.chains.get_mut("pangoro").unwrap().id = 0;
        assert_eq!(
            deployment.validate_chains(),
            Err(DeploymentError::ZeroChainId("pangoro".to_owned()))
        );
    }
}
