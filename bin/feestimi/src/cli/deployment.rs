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


use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use feestimi_types::deployment::DeploymentSpec;
use paste::paste;

/// Resolve the deployment from the network flag, a deployment file and the environment
pub fn resolve_deployment(
    network: &Option<String>,
    file: &Option<String>,
) -> anyhow::Result<DeploymentSpec> {
    // sources in increasing precedence:
    // - network flag
    // - file
    // - ENV, e.g. FEESTIMI_CHAINS__PANGORO__RPC_URL

    let mut config_builder = Config::builder();
    if let Some(network) = network {
        let hardcoded = get_hardcoded_deployment(network.to_lowercase().as_str())
            .with_context(|| format!("unknown hardcoded network: {network}"))?;
        config_builder = config_builder.add_source(File::from_str(hardcoded, FileFormat::Toml));
    }
    if let Some(file) = file {
        config_builder = config_builder.add_source(File::with_name(file.as_str()));
    }
    let config = config_builder
        .add_source(
            Environment::with_prefix("FEESTIMI")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("should build deployment config")?;

    let deployment: DeploymentSpec = config
        .try_deserialize()
        .context("should deserialize deployment config")?;
    deployment
        .validate_chains()
        .context("invalid chain configuration")?;

    Ok(deployment)
}

macro_rules! define_hardcoded_deployments {
    ($($network:ident),+) => {
        paste! {
            $(
                const [< $network:upper _DEPLOYMENT >]: &str = include_str!(concat!("../../deployments/", stringify!($network), ".toml"));
            )+

            fn get_hardcoded_deployment(network: &str) -> Option<&'static str> {
                match network {
                    $(
                        stringify!($network) => Some([< $network:upper _DEPLOYMENT >]),
                    )+
                    _ => None,
                }
            }

            pub const HARDCODED_DEPLOYMENTS: &[&'static str] = &[$(stringify!($network),)+];
        }
    };
}

define_hardcoded_deployments!(testnet);
