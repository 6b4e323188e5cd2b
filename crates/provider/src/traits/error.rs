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
use alloy_transport::TransportError;
use feestimi_utils::eth;

/// Result of a provider method call
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error enumeration for the Provider trait
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The call reverted on chain
    #[error("execution reverted: {reason}")]
    Revert {
        /// Decoded revert reason, or the raw data as hex
        reason: String,
        /// Raw revert data
        data: Bytes,
    },
    /// RPC Error
    #[error(transparent)]
    RPC(TransportError),
    /// Return data did not match the expected ABI
    #[error("failed to decode return data: {0}")]
    Decode(#[from] alloy_sol_types::Error),
    /// Internal errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TransportError> for ProviderError {
    fn from(err: TransportError) -> Self {
        match err.as_error_resp().and_then(|payload| payload.as_revert_data()) {
            Some(data) => ProviderError::Revert {
                reason: eth::format_revert_data(&data),
                data,
            },
            None => ProviderError::RPC(err),
        }
    }
}
