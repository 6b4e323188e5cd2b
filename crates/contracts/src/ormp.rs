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


//! ORMP endpoint and line interfaces.
//!
//! Only the functions used for fee quotes and delivery simulation are bound.

use alloy_sol_macro::sol;

sol! {
    /// Fee quote entry shared by every message line
    #[allow(missing_docs)]
    interface IMessageLine {
        function fee(uint256 toChainId, address toDapp, bytes calldata message, bytes calldata params) external view returns (uint256);
    }

    /// Line side of ORMP, called by the endpoint on message delivery
    #[allow(missing_docs)]
    interface IORMPLine {
        function recv(address fromDapp, address toDapp, bytes calldata message) external;
    }

    /// ORMP endpoint
    #[allow(missing_docs)]
    interface IORMP {
        function fee(uint256 toChainId, address toUA, bytes calldata encoded, bytes calldata params) external view returns (uint256);
    }
}
