//! Turn sequencing.
//!
//! [`CombatEngine`] is the only place that advances [`BattleState::turn`]. A
//! turn is the player's action, then each enemy action in list order, then
//! end-of-turn upkeep. Each phase is exposed on its own so an async host can
//! await presentation between them; [`CombatEngine::execute_turn`] runs them
//! back to back.

mod errors;
mod turns;
mod upkeep;

pub use errors::TurnError;
pub use turns::{ActorTurn, EndOfTurn, ExpiredStatus, SkipReason, TurnOutcome, TurnReport};
pub use upkeep::{UpkeepTick, action_gate, apply_upkeep};

use crate::state::{BattleState, TurnPhase};

/// Turn sequencer over a borrowed [`BattleState`].
pub struct CombatEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Completed turns.
    pub fn turn_number(&self) -> u64 {
        self.state.turn.turn_number
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase()
    }
}
