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

use alloy_primitives::{Bytes, U256};
use serde::{Serialize, Serializer};

/// A fee quoted by a line contract, with the params blob that produced it.
///
/// Serializes as `["<fee in base 10>", "0x<params>"]` so fees wider than a
/// JSON number survive the trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeQuote {
    /// Fee in the source chain's native currency, in its smallest unit
    pub fee: U256,
    /// Params blob passed to the quoting call
    pub params: Bytes,
}

impl FeeQuote {
    /// Create a new quote
    pub fn new(fee: U256, params: Bytes) -> Self {
        Self { fee, params }
    }
}

impl Serialize for FeeQuote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.fee.to_string(), &self.params).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::bytes;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_quote() {
        let quote = FeeQuote::new(U256::from(1_000_000_000_000_000u64), bytes!("1234"));
        assert_eq!(
            serde_json::to_value(&quote).unwrap(),
            json!(["1000000000000000", "0x1234"])
        );
    }

    #[test]
    fn test_serialize_fee_beyond_u64() {
        let quote = FeeQuote::new(U256::MAX, Bytes::new());
        assert_eq!(
            serde_json::to_value(&quote).unwrap(),
            json!([U256::MAX.to_string(), "0x"])
        );
    }
}
