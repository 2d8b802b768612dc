//! Skill catalog loader.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use combat_core::{CombatConfig, SkillSpec};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillSpec>,
}

impl SkillCatalog {
    /// Looks a skill up by name (case-sensitive).
    pub fn get(&self, name: &str) -> Option<&SkillSpec> {
        self.skills.iter().find(|skill| skill.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|skill| skill.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid skill catalog {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let catalog: SkillCatalog =
            ron::from_str(content).context("Failed to parse skill catalog RON")?;

        let mut seen = HashSet::new();
        for skill in &catalog.skills {
            anyhow::ensure!(seen.insert(skill.name.as_str()), "duplicate skill '{}'", skill.name);
            anyhow::ensure!(
                skill.accuracy <= 100 && skill.effect_chance <= 100,
                "skill '{}': accuracy and effect_chance are percentages",
                skill.name
            );
            anyhow::ensure!(
                skill.effect.is_some() || skill.effect_chance == 0,
                "skill '{}': effect_chance without an effect",
                skill.name
            );
            anyhow::ensure!(
                skill.power > 0 || skill.effect.is_some(),
                "skill '{}' has neither power nor an effect",
                skill.name
            );
            anyhow::ensure!(
                skill.range.reach() <= CombatConfig::MAX_SKILL_REACH
                    && skill.knockback <= CombatConfig::MAX_SKILL_REACH,
                "skill '{}': range and knockback are limited to {} tiles",
                skill.name,
                CombatConfig::MAX_SKILL_REACH
            );
        }

        Ok(catalog)
    }
}
