//! Configuration file handling.
//!
//! A config file selects a network and optionally overrides individual
//! consensus parameters of that network's preset:
//!
//! ```toml
//! network = "regtest"
//! log_level = "debug"
//!
//! [params]
//! averaging_window = 17
//! personalization = "TestPoW"
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use pow_types::{ConsensusParams, EquihashParams, NetworkId, Target};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub network: Option<NetworkId>,
    pub log_level: Option<String>,
    #[serde(default)]
    pub params: ParamsOverride,
}

/// Per-field overrides applied on top of a network preset.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsOverride {
    pub pow_limit: Option<Target>,
    pub target_spacing: Option<i64>,
    pub averaging_window: Option<u32>,
    pub allow_min_difficulty: Option<bool>,
    pub personalization: Option<String>,
    pub equihash: Option<EquihashParams>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

impl ParamsOverride {
    pub fn apply(self, mut params: ConsensusParams) -> ConsensusParams {
        if let Some(v) = self.pow_limit {
            params.pow_limit = v;
        }
        if let Some(v) = self.target_spacing {
            params.target_spacing = v;
        }
        if let Some(v) = self.averaging_window {
            params.averaging_window = v;
        }
        if let Some(v) = self.allow_min_difficulty {
            params.allow_min_difficulty = v;
        }
        if let Some(v) = self.personalization {
            params.personalization = v;
        }
        if let Some(v) = self.equihash {
            params.equihash = v;
        }
        params
    }
}

/// Resolve the effective parameters: the flag's network wins over the
/// file's, which wins over mainnet; file overrides then apply.
pub fn resolve_params(
    cli_network: Option<NetworkId>,
    file: Option<ConfigFile>,
) -> anyhow::Result<(NetworkId, ConsensusParams)> {
    let file = file.unwrap_or_default();
    let network = cli_network.or(file.network).unwrap_or(NetworkId::Main);
    let params = file.params.apply(ConsensusParams::for_network(network));
    params
        .validate()
        .with_context(|| format!("configured parameters for {network} are unusable"))?;
    Ok((network, params))
}
