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
use crate::{codec::ParamsShape, EncodingError};

/// ORMP endpoint quoted directly with a packed gas limit.
///
/// Superseded by [`super::OrmpLine`]. The gas limit is required and
/// positional arguments are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrmpLegacyLine;

impl Line for OrmpLegacyLine {
    fn platform(&self) -> Platform {
        Platform::OrmpLegacy
    }

    fn recv_selector(&self) -> [u8; 4] {
        IORMPLine::recvCall::SELECTOR
    }

    fn params_shape(&self) -> ParamsShape {
        ParamsShape::Packed
    }

    fn estimates_gas(&self) -> bool {
        false
    }

    fn build_params(
        &self,
        gas_limit: i128,
        _from: Address,
        args: &[String],
    ) -> Result<Bytes, EncodingError> {
        if !args.is_empty() {
            tracing::debug!("ignoring {} extra arguments for packed params", args.len());
        }
        self.params_shape().encode(gas_limit, None, None)
    }
}
