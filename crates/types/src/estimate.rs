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

/// A request to quote the fee of one cross-chain message.
///
/// Addresses and the payload are kept as the caller wrote them; the estimator
/// parses them while encoding and reports malformed input as an encoding error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EstimateFeeRequest {
    /// Platform name, e.g. `ormp`
    pub platform: String,
    /// Chain the message is sent from
    pub from_chain_id: u64,
    /// Chain the message is delivered to
    pub to_chain_id: u64,
    /// Application message as hex
    pub payload: String,
    /// Sending dapp address
    pub from_address: String,
    /// Receiving dapp address
    pub to_address: String,
    /// Optional tuning parameters
    pub extra: ExtraParams,
}

/// Optional, protocol specific parameters of an estimate request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtraParams {
    /// Destination gas limit. Estimated by simulation when absent.
    pub gas_limit: Option<i128>,
    /// Positional protocol arguments, interpreted by each platform
    pub args: Vec<String>,
}
