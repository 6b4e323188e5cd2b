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


use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use feestimi_contracts::ormp::IORMPLine;
use feestimi_types::Platform;

use super::Line;
use crate::{
    codec::{self, ParamsShape},
    EncodingError,
};

/// ORMP message line.
///
/// Positional arguments: `[refund address, extra bytes]`. The refund address
/// defaults to the sending dapp and the extra bytes to empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrmpLine;

impl Line for OrmpLine {
    fn platform(&self) -> Platform {
        Platform::Ormp
    }

    fn recv_selector(&self) -> [u8; 4] {
        IORMPLine::recvCall::SELECTOR
    }

    fn params_shape(&self) -> ParamsShape {
        ParamsShape::Tuple
    }

    fn estimates_gas(&self) -> bool {
        true
    }

    fn build_params(
        &self,
        gas_limit: i128,
        from: Address,
        args: &[String],
    ) -> Result<Bytes, EncodingError> {
        let refund = match args.first() {
            Some(refund) => codec::parse_address("refund", refund)?,
            None => from,
        };
        let extra = args
            .get(1)
            .map(|extra| codec::parse_bytes("extra", extra))
            .transpose()?;
        if args.len() > 2 {
            tracing::debug!(
                "ignoring {} extra arguments beyond refund and extra bytes",
                args.len() - 2
            );
        }

        self.params_shape().encode(gas_limit, Some(refund), extra)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, bytes, U256};
    use alloy_sol_types::SolValue;

    use super::*;

    const FROM: Address = address!("0000000000000000000000000000000000000001");
    const REFUND: Address = address!("00000000000000000000000000000000000000aa");

    fn decode(params: &Bytes) -> (U256, Address, Bytes) {
        <(U256, Address, Bytes)>::abi_decode_params(params).unwrap()
    }

    #[test]
    fn test_default_refund_and_extra() {
        let params = OrmpLine.build_params(200_000, FROM, &[]).unwrap();
        assert_eq!(decode(&params), (U256::from(200_000), FROM, Bytes::new()));
    }

    #[test]
    fn test_args() {
        let args = vec![
            "0x00000000000000000000000000000000000000aa".to_owned(),
            "0xbeef".to_owned(),
            "ignored".to_owned(),
        ];
        let params = OrmpLine.build_params(5, FROM, &args).unwrap();
        assert_eq!(decode(&params), (U256::from(5), REFUND, bytes!("beef")));
    }

    #[test]
    fn test_invalid_args() {
        assert!(matches!(
            OrmpLine.build_params(5, FROM, &["nope".to_owned()]),
            Err(EncodingError::InvalidAddress { field: "refund", .. })
        ));
        assert!(matches!(
            OrmpLine.build_params(
                5,
                FROM,
                &[
                    "0x00000000000000000000000000000000000000aa".to_owned(),
                    "0xabc".to_owned()
                ]
            ),
            Err(EncodingError::InvalidBytes { field: "extra", .. })
        ));
    }
}
