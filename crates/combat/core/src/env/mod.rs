//! Read-only collaborators of a resolution.
//!
//! [`CombatEnv`] bundles the tunables, the player's loadout snapshot and the
//! terrain/RNG oracles so the resolver and the turn sequencer can reach them
//! without depending on concrete implementations.
mod error;
mod rng;
mod terrain;

pub use error::OracleError;
pub use rng::{FixedRng, PcgRng, RngOracle, RollStream, compute_seed};
pub use terrain::{GridTerrain, OpenTerrain, TerrainOracle, bresenham};

use crate::config::CombatConfig;
use crate::modifiers::Loadout;

#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub config: &'a CombatConfig,
    pub loadout: &'a Loadout,
    terrain: Option<&'a dyn TerrainOracle>,
    rng: Option<&'a dyn RngOracle>,
}

impl<'a> CombatEnv<'a> {
    pub fn new(config: &'a CombatConfig, loadout: &'a Loadout) -> Self {
        Self {
            config,
            loadout,
            terrain: None,
            rng: None,
        }
    }

    pub fn with_all(
        config: &'a CombatConfig,
        loadout: &'a Loadout,
        terrain: &'a dyn TerrainOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            config,
            loadout,
            terrain: Some(terrain),
            rng: Some(rng),
        }
    }

    pub fn with_terrain(mut self, terrain: &'a dyn TerrainOracle) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn with_rng(mut self, rng: &'a dyn RngOracle) -> Self {
        self.rng = Some(rng);
        self
    }

    /// # Errors
    ///
    /// Returns `OracleError::TerrainNotAvailable` if no terrain oracle was provided.
    pub fn terrain(&self) -> Result<&'a dyn TerrainOracle, OracleError> {
        self.terrain.ok_or(OracleError::TerrainNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no RNG oracle was provided.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl std::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("config", self.config)
            .field("loadout", self.loadout)
            .field("terrain", &self.terrain.is_some())
            .field("rng", &self.rng.is_some())
            .finish()
    }
}
