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


//! Pure encoders for line calls and fee params.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolValue;
use strum::Display;

use crate::EncodingError;

/// Parse a hex address supplied by a caller
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, EncodingError> {
    Address::from_str(value.trim()).map_err(|_| EncodingError::InvalidAddress {
        field,
        value: value.to_owned(),
    })
}

/// Parse hex bytes supplied by a caller. `0x` and the empty string are empty bytes.
pub fn parse_bytes(field: &'static str, value: &str) -> Result<Bytes, EncodingError> {
    const_hex::decode(value.trim())
        .map(Bytes::from)
        .map_err(|e| EncodingError::InvalidBytes {
            field,
            value: value.to_owned(),
            reason: e.to_string(),
        })
}

/// Encode the call a destination endpoint makes to deliver a message:
/// `selector || abi.encode(from, to, message)`
pub fn encode_full_payload(selector: [u8; 4], from: Address, to: Address, message: &Bytes) -> Bytes {
    let args = (from, to, message.clone()).abi_encode_params();
    let mut payload = Vec::with_capacity(4 + args.len());
    payload.extend_from_slice(&selector);
    payload.extend_from_slice(&args);
    payload.into()
}

/// Layout of the params blob a line's `fee` function accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ParamsShape {
    /// `abi.encodePacked(uint256 gasLimit)`
    Packed,
    /// `abi.encode(uint256 gasLimit, address refund, bytes extra)`
    Tuple,
}

impl ParamsShape {
    /// Encode fee params.
    ///
    /// `refund` is required by [`ParamsShape::Tuple`] and ignored by
    /// [`ParamsShape::Packed`], as is `extra`, which defaults to empty bytes.
    pub fn encode(
        &self,
        gas_limit: i128,
        refund: Option<Address>,
        extra: Option<Bytes>,
    ) -> Result<Bytes, EncodingError> {
        let gas_limit = U256::from(
            u128::try_from(gas_limit).map_err(|_| EncodingError::NegativeGasLimit(gas_limit))?,
        );
        match self {
            ParamsShape::Packed => Ok(gas_limit.abi_encode_packed().into()),
            ParamsShape::Tuple => {
                let refund = refund.ok_or(EncodingError::MissingRefundAddress(*self))?;
                let extra = extra.unwrap_or_default();
                Ok((gas_limit, refund, extra).abi_encode_params().into())
            }
        }
    }
}
