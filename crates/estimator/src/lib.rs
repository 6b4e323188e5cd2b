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


#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Cross-chain message fee estimation.
//!
//! This crate contains the estimation pipeline:
//! - Encoding of the delivery call and fee params each line expects
//! - Destination gas estimation by simulating delivery
//! - Fee quotes from the source chain's line contract
//!
//! ## Feature Flags
//!
//! - `test-utils`: Export mocks and utilities for testing.

pub mod codec;

mod error;
pub use error::{EncodingError, FeeEstimationError, RemoteCallError};

mod estimator;
#[cfg(feature = "test-utils")]
pub use estimator::MockFeeEstimator;
pub use estimator::{FeeEstimator, FeeEstimatorImpl};

mod fee;
#[cfg(feature = "test-utils")]
pub use fee::MockFeeCaller;
pub use fee::{ContractFeeCaller, FeeCaller};

mod gas;
#[cfg(feature = "test-utils")]
pub use gas::MockGasEstimator;
pub use gas::{GasEstimator, SimulationGasEstimator};

pub mod line;
