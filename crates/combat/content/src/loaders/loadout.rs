//! Player loadout loader.

use std::path::Path;

use anyhow::Context;
use combat_core::Loadout;

use crate::loaders::{LoadResult, read_file};

/// Loader for meta-progression snapshots from RON files.
///
/// The file mirrors [`Loadout`]; omitted sections contribute nothing.
pub struct LoadoutLoader;

impl LoadoutLoader {
    pub fn load(path: &Path) -> LoadResult<Loadout> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid loadout {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Loadout> {
        let loadout: Loadout = ron::from_str(content).context("Failed to parse loadout RON")?;

        for relic in &loadout.relics {
            anyhow::ensure!(
                relic.type_advantage_multiplier >= 1.0,
                "relic '{}': type_advantage_multiplier below 1.0",
                relic.name
            );
        }
        if let Some(gem) = &loadout.type_gem {
            anyhow::ensure!(gem.multiplier > 0.0, "type gem multiplier must be positive");
        }

        Ok(loadout)
    }
}
