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


use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feestimi_estimator::FeeEstimationError;
use serde::Serialize;

/// Error envelope code for invalid request parameters
pub(crate) const INVALID_PARAMS_CODE: u32 = 1;
/// Error envelope code for unknown platforms
pub(crate) const UNSUPPORTED_PROTOCOL_CODE: u32 = 2;
/// Error envelope code for addresses missing from the registry
pub(crate) const ADDRESS_NOT_FOUND_CODE: u32 = 3;
/// Error envelope code for input that could not be encoded
pub(crate) const ENCODING_CODE: u32 = 4;
/// Error envelope code for failed chain calls
pub(crate) const REMOTE_CALL_CODE: u32 = 5;
/// Error envelope code for a missing or wrong API key
pub(crate) const UNAUTHORIZED_CODE: u32 = 6;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: u32,
    error: String,
}

/// Error returned by an API route
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed query parameter
    #[error("{0}")]
    InvalidParams(String),
    /// Error from the fee estimator
    #[error(transparent)]
    Estimation(#[from] FeeEstimationError),
    /// Missing or wrong API key
    #[error("invalid or missing api key")]
    Unauthorized,
    /// The request did not finish within the server timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Code carried in the error envelope
    pub fn code(&self) -> u32 {
        match self {
            ApiError::InvalidParams(_) => INVALID_PARAMS_CODE,
            ApiError::Estimation(err) => match err {
                FeeEstimationError::UnsupportedProtocol(_) => UNSUPPORTED_PROTOCOL_CODE,
                FeeEstimationError::AddressNotFound(_) => ADDRESS_NOT_FOUND_CODE,
                FeeEstimationError::Encoding(_) => ENCODING_CODE,
                FeeEstimationError::RemoteCall(_) => REMOTE_CALL_CODE,
            },
            ApiError::Unauthorized => UNAUTHORIZED_CODE,
            // a slow request is almost always a slow chain rpc
            ApiError::Timeout(_) => REMOTE_CALL_CODE,
        }
    }

    /// HTTP status of the response
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            code: self.code(),
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
