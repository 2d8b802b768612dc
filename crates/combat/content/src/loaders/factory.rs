//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, Loadout};

use crate::loaders::{
    ConfigLoader, Encounter, EncounterLoader, LoadResult, LoadoutLoader, SkillCatalog, SkillLoader,
};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── skills.ron
/// ├── loadout.ron
/// └── encounters/
///     └── training_grounds.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `combat.toml`.
    ///
    /// A missing file is not an error: the defaults apply.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no combat.toml, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        let path = self.data_dir.join("skills.ron");
        SkillLoader::load(&path)
    }

    /// Load the player loadout from `loadout.ron`.
    pub fn load_loadout(&self) -> LoadResult<Loadout> {
        let path = self.data_dir.join("loadout.ron");
        LoadoutLoader::load(&path)
    }

    /// Load an encounter from `encounters/{name}.ron`.
    pub fn load_encounter(&self, name: &str) -> LoadResult<Encounter> {
        let path = self
            .data_dir
            .join("encounters")
            .join(format!("{name}.ron"));
        EncounterLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }
}
