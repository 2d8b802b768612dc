//! Authoritative battle state.
//!
//! Everything the resolver and the turn sequencer mutate lives in
//! [`BattleState`]. Read-only inputs (loadout, config, terrain, RNG) are
//! supplied separately through [`crate::env::CombatEnv`].
mod chain;
mod combatant;
mod common;
mod roster;
mod status;
mod turn;

pub use chain::{ChainAction, ScoreChain};
pub use combatant::{CombatStats, Combatant, Team};
pub use common::{Direction, EntityId, Position};
pub use roster::Roster;
pub use status::{
    ActiveStatus, ExpiredStatuses, StatusEffect, StatusEffectSet, StatusKind,
};
pub use turn::{TurnPhase, TurnState};

use crate::modifiers::{ComboState, FieldConditions};

/// Canonical snapshot of one encounter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// Base seed for every roll. Set once per floor.
    pub game_seed: u64,

    /// Resolved actions so far. Mixed into every roll seed.
    pub action_nonce: u64,

    pub roster: Roster,
    /// Persists for the whole run; carried over between floors by the host.
    pub chain: ScoreChain,
    pub combo: ComboState,
    pub field: FieldConditions,
    pub turn: TurnState,
}

impl BattleState {
    pub fn new(game_seed: u64, roster: Roster) -> Self {
        Self {
            game_seed,
            roster,
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: FieldConditions) -> Self {
        self.field = field;
        self
    }

    pub fn with_chain(mut self, chain: ScoreChain) -> Self {
        self.chain = chain;
        self
    }

    /// True once the player has been reduced to 0 HP (or is missing).
    pub fn player_defeated(&self) -> bool {
        self.roster.player().is_none_or(|player| !player.is_alive())
    }
}
