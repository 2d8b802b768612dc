//! Data-driven combat content and its loaders.
//!
//! This crate reads the tunables and catalogs the combat rules consume:
//! - Combat configuration (TOML)
//! - Skill catalogs (RON)
//! - Player loadout snapshots (RON)
//! - Encounter layouts: arena, field conditions and combatants (RON)
//!
//! Content is turned into `combat-core` types at load time and never reaches
//! back into battle state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatantSpec, ConfigLoader, ContentFactory, Encounter, EncounterLoader, EncounterSpec,
    LoadResult, LoadoutLoader, SkillCatalog, SkillLoader,
};
