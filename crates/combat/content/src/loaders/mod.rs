//! Content loaders for reading combat data from files.

pub mod config;
pub mod encounter;
pub mod factory;
pub mod loadout;
pub mod skills;

pub use config::ConfigLoader;
pub use encounter::{CombatantSpec, Encounter, EncounterLoader, EncounterSpec};
pub use factory::ContentFactory;
pub use loadout::LoadoutLoader;
pub use skills::{SkillCatalog, SkillLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
