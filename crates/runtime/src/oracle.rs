//! Owned collaborators behind a [`CombatEnv`].
use combat_core::{CombatConfig, CombatEnv, GridTerrain, Loadout, PcgRng};

/// Read-only inputs of every resolution for one encounter.
///
/// [`CombatEnv`] only borrows; the bundle keeps the owned values alive for as
/// long as the runner needs them.
#[derive(Clone, Debug)]
pub struct OracleBundle {
    pub config: CombatConfig,
    pub loadout: Loadout,
    pub terrain: GridTerrain,
    rng: PcgRng,
}

impl OracleBundle {
    pub fn new(config: CombatConfig, loadout: Loadout, terrain: GridTerrain) -> Self {
        Self {
            config,
            loadout,
            terrain,
            rng: PcgRng,
        }
    }

    pub fn env(&self) -> CombatEnv<'_> {
        CombatEnv::with_all(&self.config, &self.loadout, &self.terrain, &self.rng)
    }
}
