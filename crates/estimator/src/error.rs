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


use feestimi_provider::ProviderError;
use feestimi_types::{AddressNotFoundError, Platform};

use crate::codec::ParamsShape;

/// Error type for fee estimation
#[derive(Debug, thiserror::Error)]
pub enum FeeEstimationError {
    /// Platform name does not match any supported protocol
    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),
    /// A contract address is missing from the registry
    #[error(transparent)]
    AddressNotFound(#[from] AddressNotFoundError),
    /// Caller input could not be encoded
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// A chain call failed
    #[error(transparent)]
    RemoteCall(#[from] RemoteCallError),
}

/// Malformed address, message or parameter input
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// Value is not a 20 byte hex address
    #[error("invalid {field} address: {value:?}")]
    InvalidAddress {
        /// Name of the input
        field: &'static str,
        /// Value as supplied
        value: String,
    },
    /// Value is not hex encoded bytes
    #[error("invalid {field} bytes {value:?}: {reason}")]
    InvalidBytes {
        /// Name of the input
        field: &'static str,
        /// Value as supplied
        value: String,
        /// Decoder message
        reason: String,
    },
    /// Gas limit below zero
    #[error("gas limit cannot be negative: {0}")]
    NegativeGasLimit(i128),
    /// Params shape needs a refund address and none was given
    #[error("{0} params require a refund address")]
    MissingRefundAddress(ParamsShape),
    /// Platform cannot estimate gas and the caller gave no gas limit
    #[error("{0} requires an explicit gas_limit")]
    MissingGasLimit(Platform),
}

/// Failure talking to a chain
#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    /// No RPC provider is configured for the chain
    #[error("no rpc provider configured for chain {0}")]
    NoProvider(u64),
    /// The provider call failed, reverted, or returned undecodable data
    #[error("call on chain {chain_id} failed: {source}")]
    Provider {
        /// Chain that was called
        chain_id: u64,
        /// Provider error
        #[source]
        source: ProviderError,
    },
}

impl RemoteCallError {
    pub(crate) fn provider(chain_id: u64) -> impl FnOnce(ProviderError) -> Self {
        move |source| RemoteCallError::Provider { chain_id, source }
    }
}
