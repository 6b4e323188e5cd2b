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


//! Per-protocol encoding rules.
//!
//! Each [`Platform`] maps to exactly one [`Line`] through [`line_for`]. Adding a
//! platform variant fails to compile until it has a line here.

use alloy_primitives::{Address, Bytes};
use feestimi_types::Platform;

use crate::{
    codec::{self, ParamsShape},
    EncodingError,
};

mod ormp;
pub use ormp::OrmpLine;

mod ormp_legacy;
pub use ormp_legacy::OrmpLegacyLine;

/// Encoding capabilities of one messaging protocol
pub trait Line: Send + Sync {
    /// Platform this line implements
    fn platform(&self) -> Platform;

    /// Selector of the destination line's receive function
    fn recv_selector(&self) -> [u8; 4];

    /// Layout of the params blob passed to `fee`
    fn params_shape(&self) -> ParamsShape;

    /// Whether a missing gas limit can be estimated by simulating delivery
    fn estimates_gas(&self) -> bool;

    /// Encode the delivery call for a message
    fn build_full_payload(&self, from: Address, to: Address, message: &Bytes) -> Bytes {
        codec::encode_full_payload(self.recv_selector(), from, to, message)
    }

    /// Encode fee params from a gas limit and the caller's positional arguments.
    ///
    /// `from` is the sending dapp, used where the protocol needs a default
    /// refund address.
    fn build_params(
        &self,
        gas_limit: i128,
        from: Address,
        args: &[String],
    ) -> Result<Bytes, EncodingError>;
}

/// The line implementing `platform`
pub fn line_for(platform: Platform) -> &'static dyn Line {
    match platform {
        Platform::Ormp => &OrmpLine,
        Platform::OrmpLegacy => &OrmpLegacyLine,
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_line_for_every_platform() {
        for platform in Platform::iter() {
            let line = line_for(platform);
            assert_eq!(line.platform(), platform);
            assert_eq!(line.recv_selector(), [0x39, 0x4d, 0x1b, 0xca]);
        }
    }
}
