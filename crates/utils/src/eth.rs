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

//! Helpers for interpreting data returned by EVM calls.

use alloy_primitives::Bytes;
use alloy_sol_types::{Panic, Revert, SolError};

/// Parses the reason out of `Error(string)` revert data
pub fn parse_revert_message(revert_data: &[u8]) -> Option<String> {
    Revert::abi_decode(revert_data)
        .ok()
        .map(|err| err.reason)
}

/// Describes revert data for humans: the `Error(string)` reason if there is
/// one, then the `Panic(uint256)` code, then the raw bytes.
pub fn format_revert_data(revert_data: &Bytes) -> String {
    if let Some(reason) = parse_revert_message(revert_data) {
        return reason;
    }
    if let Ok(panic) = Panic::abi_decode(revert_data) {
        return format!("panic code {:#x}", panic.code);
    }
    if revert_data.is_empty() {
        "no revert data".to_owned()
    } else {
        revert_data.to_string()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{bytes, U256};

    use super::*;

    #[test]
    fn test_parse_revert_message() {
        let data = Revert {
            reason: "!auth".to_owned(),
        }
        .abi_encode();
        assert_eq!(parse_revert_message(&data), Some("!auth".to_owned()));
        assert_eq!(parse_revert_message(&[0xde, 0xad]), None);
    }

    #[test]
    fn test_format_revert_data() {
        let panic = Panic {
            code: U256::from(0x11),
        }
        .abi_encode();
        assert_eq!(format_revert_data(&panic.into()), "panic code 0x11");
        assert_eq!(format_revert_data(&Bytes::new()), "no revert data");
        assert_eq!(format_revert_data(&bytes!("deadbeef")), "0xdeadbeef");
    }
}
