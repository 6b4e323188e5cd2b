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

//! Address tables for the contracts each platform deploys per chain.
//!
//! Tables are built once at startup and never written again, so the registry
//! can be shared across concurrent requests without synchronization.

use std::collections::HashMap;

use alloy_primitives::Address;
use strum::{Display, EnumIter};

use crate::Platform;

/// The part a contract plays in delivering a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum AddressRole {
    /// Entry contract on the source chain, the target of the fee quote
    SourceLine,
    /// Line contract on the destination chain that receives the message
    DestinationLine,
    /// Core endpoint on the destination chain that calls into the line
    DestinationEndpoint,
}

/// A required address is missing from the registry
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no {role} address for {platform} on chain {chain_id}")]
pub struct AddressNotFoundError {
    /// Platform that was being resolved
    pub platform: Platform,
    /// Chain with no entry
    pub chain_id: u64,
    /// Role with no entry
    pub role: AddressRole,
}

/// Chain id to contract address, for one platform and one role
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressTable(HashMap<u64, Address>);

impl AddressTable {
    /// Address deployed on `chain_id`, if any
    pub fn get(&self, chain_id: u64) -> Option<Address> {
        self.0.get(&chain_id).copied()
    }
}

impl FromIterator<(u64, Address)> for AddressTable {
    fn from_iter<I: IntoIterator<Item = (u64, Address)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// All address tables of a single platform
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineAddresses {
    /// Quote targets on source chains
    pub source_lines: AddressTable,
    /// Receiving lines on destination chains
    pub destination_lines: AddressTable,
    /// Endpoints on destination chains
    pub destination_endpoints: AddressTable,
}

impl LineAddresses {
    /// The table holding addresses for `role`
    pub fn table(&self, role: AddressRole) -> &AddressTable {
        match role {
            AddressRole::SourceLine => &self.source_lines,
            AddressRole::DestinationLine => &self.destination_lines,
            AddressRole::DestinationEndpoint => &self.destination_endpoints,
        }
    }
}

/// Immutable registry of every platform's address tables
#[derive(Clone, Debug, Default)]
pub struct AddressRegistry {
    lines: HashMap<Platform, LineAddresses>,
}

impl AddressRegistry {
    /// Create a registry from per-platform tables
    pub fn new(lines: HashMap<Platform, LineAddresses>) -> Self {
        Self { lines }
    }

    /// Resolve the address playing `role` for `platform` on `chain_id`.
    ///
    /// A missing entry is an error, never a zero address.
    pub fn resolve(
        &self,
        platform: Platform,
        chain_id: u64,
        role: AddressRole,
    ) -> Result<Address, AddressNotFoundError> {
        self.lines
            .get(&platform)
            .and_then(|lines| lines.table(role).get(chain_id))
            .ok_or(AddressNotFoundError {
                platform,
                chain_id,
                role,
            })
    }
}
