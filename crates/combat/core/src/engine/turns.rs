use crate::action::ActionRequest;
use crate::combat::{ActionOutcome, CombatResolver};
use crate::env::{CombatEnv, RollStream};
use crate::error::CombatError;
use crate::state::{BattleState, EntityId, StatusKind};

use super::upkeep::{UpkeepTick, action_gate, apply_upkeep};
use super::{CombatEngine, TurnError};

/// Why an actor did not act.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    /// Frozen, Flinch, Drowsy, or a failed Paralyze roll.
    Status(StatusKind),
    ActorDefeated,
    /// The player fell earlier in the turn.
    PlayerDefeated,
}

/// What one actor did during a turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorTurn {
    Acted(ActionOutcome),
    Skipped { actor: EntityId, reason: SkipReason },
}

impl ActorTurn {
    pub fn actor(&self) -> EntityId {
        match self {
            ActorTurn::Acted(outcome) => outcome.actor,
            ActorTurn::Skipped { actor, .. } => *actor,
        }
    }

    pub fn outcome(&self) -> Option<&ActionOutcome> {
        match self {
            ActorTurn::Acted(outcome) => Some(outcome),
            ActorTurn::Skipped { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpiredStatus {
    pub entity: EntityId,
    pub status: StatusKind,
}

/// End-of-turn bookkeeping.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndOfTurn {
    /// Turn counter after the increment.
    pub turn_number: u64,
    pub upkeep: Vec<UpkeepTick>,
    pub expired: Vec<ExpiredStatus>,
    /// Entities confirmed defeated and taken off the roster.
    pub removed: Vec<EntityId>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// Index of the turn that was played (turns completed before it).
    pub turn: u64,
    pub player: ActorTurn,
    pub enemies: Vec<ActorTurn>,
    pub end: EndOfTurn,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnOutcome {
    Completed(TurnReport),
    /// Another turn was in flight; nothing changed.
    Rejected(TurnError),
}

impl TurnOutcome {
    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            TurnOutcome::Completed(report) => Some(report),
            TurnOutcome::Rejected(_) => None,
        }
    }
}

/// Turn phases for CombatEngine.
impl<'a> CombatEngine<'a> {
    /// Marks the turn as in flight.
    ///
    /// # Errors
    ///
    /// Returns `TurnError::AlreadyProcessing` if a turn is already in flight;
    /// the state is left untouched.
    pub fn begin_turn(&mut self) -> Result<u64, TurnError> {
        let turn = &mut self.state.turn;
        if turn.processing {
            return Err(TurnError::AlreadyProcessing {
                turn: turn.turn_number,
            });
        }

        turn.processing = true;
        tracing::info!(turn = turn.turn_number, "turn started");
        Ok(turn.turn_number)
    }

    /// Resolves the player's action.
    pub fn player_phase(&mut self, env: CombatEnv<'_>, request: &ActionRequest) -> ActorTurn {
        self.act(env, request)
    }

    /// Resolves one enemy action. Skipped once the player is down or when
    /// the actor itself has fallen.
    pub fn enemy_action(&mut self, env: CombatEnv<'_>, request: &ActionRequest) -> ActorTurn {
        if self.state.player_defeated() {
            return ActorTurn::Skipped {
                actor: request.actor,
                reason: SkipReason::PlayerDefeated,
            };
        }

        let alive = self
            .state
            .roster
            .get(request.actor)
            .is_some_and(|actor| actor.is_alive());
        if !alive {
            return ActorTurn::Skipped {
                actor: request.actor,
                reason: SkipReason::ActorDefeated,
            };
        }

        self.act(env, request)
    }

    /// Resolves enemy actions in list order, each fully applied before the
    /// next begins.
    pub fn enemy_phase(
        &mut self,
        env: CombatEnv<'_>,
        requests: &[ActionRequest],
    ) -> Vec<ActorTurn> {
        requests
            .iter()
            .map(|request| self.enemy_action(env, request))
            .collect()
    }

    /// Default enemy behaviour: a basic attack from every living enemy, in
    /// roster order.
    pub fn enemy_requests(&self) -> Vec<ActionRequest> {
        self.state
            .roster
            .living_enemies()
            .into_iter()
            .map(ActionRequest::basic)
            .collect()
    }

    /// Status upkeep, duration tick, Shadow Dance countdown, removal of
    /// defeated combatants. Advances the turn counter by exactly one and
    /// returns the sequencer to idle.
    pub fn end_turn(&mut self) -> EndOfTurn {
        let BattleState {
            roster,
            chain,
            combo,
            turn,
            ..
        } = &mut *self.state;

        let mut upkeep = Vec::new();
        let mut expired = Vec::new();

        for combatant in roster.iter_mut().filter(|c| c.is_alive()) {
            let ticks = apply_upkeep(combatant);
            if combatant.is_player() && ticks.iter().any(|tick| tick.damage > 0) {
                chain.reset_chain();
            }
            upkeep.extend(ticks);

            if combatant.is_alive() {
                expired.extend(combatant.statuses.tick().into_iter().map(|status| {
                    ExpiredStatus {
                        entity: combatant.id,
                        status,
                    }
                }));
            }
        }

        combo.end_turn();
        let removed = roster.remove_defeated();

        turn.turn_number += 1;
        turn.processing = false;

        tracing::info!(
            turn = turn.turn_number,
            removed = removed.len(),
            chain = chain.current_multiplier,
            "turn completed"
        );

        EndOfTurn {
            turn_number: turn.turn_number,
            upkeep,
            expired,
            removed,
        }
    }

    /// Runs a whole turn: player action, enemy actions, end of turn.
    ///
    /// A call while another turn is processing is rejected with no side
    /// effects.
    pub fn execute_turn(
        &mut self,
        env: CombatEnv<'_>,
        player: &ActionRequest,
        enemies: &[ActionRequest],
    ) -> TurnOutcome {
        let turn = match self.begin_turn() {
            Ok(turn) => turn,
            Err(error) => {
                tracing::debug!(code = error.error_code(), %error, "turn rejected");
                return TurnOutcome::Rejected(error);
            }
        };

        let player = self.player_phase(env, player);
        let enemies = self.enemy_phase(env, enemies);
        let end = self.end_turn();

        TurnOutcome::Completed(TurnReport {
            turn,
            player,
            enemies,
            end,
        })
    }

    fn act(&mut self, env: CombatEnv<'_>, request: &ActionRequest) -> ActorTurn {
        if let Some(status) = self.gate(env, request.actor) {
            tracing::info!(actor = %request.actor, %status, "action skipped");
            return ActorTurn::Skipped {
                actor: request.actor,
                reason: SkipReason::Status(status),
            };
        }

        ActorTurn::Acted(CombatResolver::new(env).resolve(self.state, request))
    }

    /// Status gate before an action. A Paralyze roll consumes its own nonce
    /// so it never shares a seed with the action's rolls.
    fn gate(&mut self, env: CombatEnv<'_>, actor: EntityId) -> Option<StatusKind> {
        let rng = env.rng().ok()?;
        let combatant = self.state.roster.get(actor).filter(|c| c.is_alive())?;

        let mut rolls =
            RollStream::new(rng, self.state.game_seed, self.state.action_nonce, actor);
        let skipped = action_gate(combatant, env.config, &mut rolls);
        if rolls.draws() > 0 {
            self.state.action_nonce += 1;
        }
        skipped
    }
}
