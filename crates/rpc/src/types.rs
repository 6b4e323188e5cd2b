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


use feestimi_types::{EstimateFeeRequest, ExtraParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ApiError;

/// Success envelope: `{ "code": 0, "data": .., "warnings": [..] }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always zero
    pub code: u32,
    /// Route result
    pub data: T,
    /// Non fatal problems with the request, omitted when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap a route result
    pub fn ok(data: T) -> Self {
        Self {
            code: 0,
            data,
            warnings: vec![],
        }
    }

    /// Attach warnings
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// A configured chain as listed by `GET /chains`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainInfo {
    /// Chain id
    pub id: u64,
    /// Chain name
    pub name: String,
}

/// Query string of `GET /{platform}/estimate_fee`.
///
/// Every field is optional here so that missing and malformed values produce
/// the API's own error envelope.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EstimateFeeQuery {
    /// Source chain id
    pub from_chain_id: Option<String>,
    /// Destination chain id
    pub to_chain_id: Option<String>,
    /// Destination gas limit, estimated when absent
    pub gas_limit: Option<String>,
    /// Hex message
    pub payload: Option<String>,
    /// Sending dapp
    pub from_address: Option<String>,
    /// Receiving dapp
    pub to_address: Option<String>,
    /// JSON list of positional protocol arguments
    pub extra: Option<String>,
}

impl EstimateFeeQuery {
    /// Validate the query into an estimator request, with any warnings about
    /// parameters that were dropped
    pub fn into_request(
        self,
        platform: String,
    ) -> Result<(EstimateFeeRequest, Vec<String>), ApiError> {
        let from_chain_id = parse_chain_id("from_chain_id", self.from_chain_id)?;
        let to_chain_id = parse_chain_id("to_chain_id", self.to_chain_id)?;
        let payload = required("payload", self.payload)?;
        let from_address = required("from_address", self.from_address)?;
        let to_address = required("to_address", self.to_address)?;

        let gas_limit = match non_empty(self.gas_limit) {
            Some(gas_limit) => Some(gas_limit.trim().parse::<i128>().map_err(|_| {
                ApiError::InvalidParams(format!("gas_limit must be an integer, got {gas_limit:?}"))
            })?),
            None => None,
        };

        let mut warnings = vec![];
        let args = match non_empty(self.extra) {
            Some(extra) => parse_extra(&extra).unwrap_or_else(|warning| {
                tracing::warn!("{warning}");
                warnings.push(warning);
                vec![]
            }),
            None => vec![],
        };

        let request = EstimateFeeRequest {
            platform,
            from_chain_id,
            to_chain_id,
            payload,
            from_address,
            to_address,
            extra: ExtraParams { gas_limit, args },
        };
        Ok((request, warnings))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(name: &str, value: Option<String>) -> Result<String, ApiError> {
    non_empty(value).ok_or_else(|| ApiError::InvalidParams(format!("{name} is required")))
}

fn parse_chain_id(name: &str, value: Option<String>) -> Result<u64, ApiError> {
    let value = required(name, value)?;
    value.trim().parse::<u64>().map_err(|_| {
        ApiError::InvalidParams(format!("{name} must be a chain id, got {value:?}"))
    })
}

/// Parse `extra` as a JSON list of strings. Numbers are taken as their decimal text.
fn parse_extra(extra: &str) -> Result<Vec<String>, String> {
    let ignored = || format!("ignoring extra {extra:?}: expected a JSON list of strings");
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(extra) else {
        return Err(ignored());
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(ignored()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> EstimateFeeQuery {
        EstimateFeeQuery {
            from_chain_id: Some("421613".into()),
            to_chain_id: Some("43".into()),
            gas_limit: Some("200000".into()),
            payload: Some("0x1234".into()),
            from_address: Some("0x0000000000000000000000000000000000000001".into()),
            to_address: Some("0x0000000000000000000000000000000000000002".into()),
            extra: None,
        }
    }

    #[test]
    fn test_into_request() {
        let (request, warnings) = query().into_request("ormp".into()).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(request.platform, "ormp");
        assert_eq!(request.from_chain_id, 421613);
        assert_eq!(request.to_chain_id, 43);
        assert_eq!(request.extra.gas_limit, Some(200_000));
        assert!(request.extra.args.is_empty());
    }

    #[test]
    fn test_optional_gas_limit() {
        let mut q = query();
        q.gas_limit = None;
        assert_eq!(q.into_request("ormp".into()).unwrap().0.extra.gas_limit, None);

        let mut q = query();
        q.gas_limit = Some(String::new());
        assert_eq!(q.into_request("ormp".into()).unwrap().0.extra.gas_limit, None);
    }

    #[test]
    fn test_invalid_params() {
        let mut q = query();
        q.from_chain_id = None;
        assert!(matches!(
            q.into_request("ormp".into()),
            Err(ApiError::InvalidParams(m)) if m == "from_chain_id is required"
        ));

        let mut q = query();
        q.to_chain_id = Some("forty-three".into());
        assert!(q.into_request("ormp".into()).is_err());

        let mut q = query();
        q.gas_limit = Some("1e6".into());
        assert!(q.into_request("ormp".into()).is_err());

        let mut q = query();
        q.payload = None;
        assert!(q.into_request("ormp".into()).is_err());
    }

    #[test]
    fn test_extra() {
        let mut q = query();
        q.extra = Some(r#"["0x00000000000000000000000000000000000000aa", 7]"#.into());
        let (request, warnings) = q.into_request("ormp".into()).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(
            request.extra.args,
            vec!["0x00000000000000000000000000000000000000aa", "7"]
        );
    }

    #[test]
    fn test_malformed_extra() {
        for extra in ["not json", r#"{"a": 1}"#, r#"[["nested"]]"#, "\"0x12\""] {
            let mut q = query();
            q.extra = Some(extra.into());
            let (request, warnings) = q.into_request("ormp".into()).unwrap();
            assert!(request.extra.args.is_empty());
            assert_eq!(warnings.len(), 1, "{extra}");
        }
    }
}
