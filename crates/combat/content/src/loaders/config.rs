//! Combat configuration loader.

use std::path::Path;

use anyhow::Context;
use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tunables from TOML files.
///
/// Every key is optional; missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig =
            toml::from_str(content).context("Failed to parse combat config TOML")?;

        anyhow::ensure!(
            config.crit_multiplier >= 1.0,
            "crit_multiplier must be at least 1.0, got {}",
            config.crit_multiplier
        );
        anyhow::ensure!(
            config.max_dodge_chance <= 100,
            "max_dodge_chance is a percentage, got {}",
            config.max_dodge_chance
        );
        anyhow::ensure!(
            config
                .chain
                .tiers
                .windows(2)
                .all(|pair| pair[0].threshold < pair[1].threshold),
            "chain tiers must be sorted by ascending threshold"
        );

        Ok(config)
    }
}
