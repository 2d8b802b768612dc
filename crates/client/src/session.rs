//! Assembles a turn runner from content files.
use anyhow::{Context, Result};
use combat_content::{ContentFactory, SkillCatalog};
use combat_runtime::{EventBus, OracleBundle, RuntimeConfig, TurnRunner};

use crate::presenter::LogPresenter;

/// Everything the simulator needs for one encounter.
pub struct Session {
    pub runner: TurnRunner,
    pub skills: SkillCatalog,
}

impl Session {
    pub fn load(config: &RuntimeConfig, encounter: &str, events: EventBus) -> Result<Self> {
        let factory = match &config.content_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        tracing::info!(data_dir = %factory.data_dir().display(), encounter, "loading content");

        let combat_config = factory.load_config()?;
        let skills = factory.load_skills()?;
        let loadout = factory.load_loadout()?;
        let mut encounter = factory
            .load_encounter(encounter)
            .with_context(|| format!("Failed to load encounter '{encounter}'"))?;

        if let Some(seed) = config.seed {
            tracing::info!(seed, "seed overridden from environment");
            encounter.state.game_seed = seed;
        }

        let runner = TurnRunner::builder()
            .state(encounter.state)
            .oracles(OracleBundle::new(combat_config, loadout, encounter.terrain))
            .presenter(LogPresenter::new(config.present_delay))
            .events(events)
            .build()?;

        Ok(Self { runner, skills })
    }
}
