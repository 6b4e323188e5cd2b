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

//! Messaging protocols that fees can be estimated for

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A cross-chain messaging protocol ("line").
///
/// The set is closed. A platform name that does not parse into one of these
/// variants is rejected before any address is resolved or any chain is called.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// ORMP message line.
    ///
    /// Quotes the line contract with tuple-encoded params and estimates the
    /// destination gas limit when the caller does not provide one.
    Ormp,
    /// ORMP endpoint quoted directly with a packed gas limit.
    ///
    /// Superseded by [`Platform::Ormp`], kept for existing callers.
    OrmpLegacy,
}

impl Platform {
    /// Whether the platform has been replaced by a newer variant
    pub fn is_superseded(&self) -> bool {
        match self {
            Platform::Ormp => false,
            Platform::OrmpLegacy => true,
        }
    }
}
