//! Async turn loop with a single-flight guard.
//!
//! Each phase is applied synchronously through [`CombatEngine`] and only then
//! presented. The sole concurrency control is the `processing` flag: a turn
//! requested while another is in flight is rejected, never queued.
//!
//! The turn body runs on its own task. Dropping the future returned by
//! [`TurnRunner::execute_turn`] stops waiting for the report but the turn
//! still runs to completion.
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use combat_core::{
    ActionRequest, ActorTurn, BattleState, CombatEngine, CombatError, ScoreChain, TurnError,
    TurnOutcome, TurnReport,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::{Result, RuntimeError};
use crate::events::{ActionEvent, Event, EventBus, TurnEvent};
use crate::oracle::OracleBundle;
use crate::presenter::{NullPresenter, PresentationStep, Presenter};

/// Owns the battle state for one encounter and drives whole turns.
pub struct TurnRunner {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<BattleState>,
    oracles: OracleBundle,
    presenter: Box<dyn Presenter>,
    events: EventBus,
    processing: AtomicBool,
    /// Mirrors `state.turn.turn_number` so rejections never wait on the lock.
    turn_number: AtomicU64,
}

impl TurnRunner {
    pub fn builder() -> TurnRunnerBuilder {
        TurnRunnerBuilder::default()
    }

    /// Runs one turn: the player's action, every enemy action in list order,
    /// then end-of-turn bookkeeping. The presenter is awaited after each step.
    ///
    /// A call while another turn is in flight returns
    /// [`TurnOutcome::Rejected`] immediately and changes nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn execute_turn(
        &self,
        player: &ActionRequest,
        enemies: &[ActionRequest],
    ) -> TurnOutcome {
        let Some(guard) = ProcessingGuard::acquire(&self.shared) else {
            let error = TurnError::AlreadyProcessing {
                turn: self.turn_number(),
            };
            return self.shared.reject(error);
        };

        let player = player.clone();
        let enemies = enemies.to_vec();
        let task = tokio::spawn(async move { guard.shared.run_turn(&player, &enemies).await });

        match task.await {
            Ok(outcome) => outcome,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(_) => {
                let turn = self.turn_number();
                tracing::warn!(turn, "turn task cancelled");
                self.shared.reject(TurnError::Interrupted { turn })
            }
        }
    }

    /// Basic attacks from every living enemy, in roster order.
    pub async fn enemy_requests(&self) -> Vec<ActionRequest> {
        let mut state = self.shared.state.lock().await;
        CombatEngine::new(&mut state).enemy_requests()
    }

    /// True while a turn is in flight.
    pub fn is_processing(&self) -> bool {
        self.shared.processing.load(Ordering::Acquire)
    }

    /// Turns completed so far.
    pub fn turn_number(&self) -> u64 {
        self.shared.turn_number.load(Ordering::Acquire)
    }

    /// The encounter is over once the player fell or no enemy is left.
    pub async fn is_finished(&self) -> bool {
        let state = self.shared.state.lock().await;
        state.player_defeated() || state.roster.living_enemies().is_empty()
    }

    /// Clone of the current state. Waits for an in-flight turn to finish.
    pub async fn snapshot(&self) -> BattleState {
        self.shared.state.lock().await.clone()
    }

    /// Settles the chain bonus and returns the chain for the host to carry
    /// into the next floor.
    pub async fn summarize_chain(&self) -> ScoreChain {
        let mut state = self.shared.state.lock().await;
        let bonus = state.chain.summarize(&self.shared.oracles.config.chain);
        tracing::info!(
            bonus,
            max_chain = state.chain.max_chain_reached,
            "score chain summarized"
        );
        state.chain.clone()
    }

    pub fn events(&self) -> &EventBus {
        &self.shared.events
    }

    pub fn oracles(&self) -> &OracleBundle {
        &self.shared.oracles
    }
}

impl Shared {
    async fn run_turn(&self, player: &ActionRequest, enemies: &[ActionRequest]) -> TurnOutcome {
        let mut state = self.state.lock().await;
        let env = self.oracles.env();

        let turn = match CombatEngine::new(&mut state).begin_turn() {
            Ok(turn) => turn,
            Err(error) => return self.reject(error),
        };
        let mut state = InFlight(state);
        self.events.publish(Event::Turn(TurnEvent::Started { turn }));

        let player_turn = CombatEngine::new(&mut state).player_phase(env, player);
        self.present_actor(turn, &player_turn).await;

        let mut enemy_turns = Vec::with_capacity(enemies.len());
        for request in enemies {
            let actor_turn = CombatEngine::new(&mut state).enemy_action(env, request);
            self.present_actor(turn, &actor_turn).await;
            enemy_turns.push(actor_turn);
        }

        let end = CombatEngine::new(&mut state).end_turn();
        self.turn_number.store(end.turn_number, Ordering::Release);
        self.events.publish(Event::Turn(TurnEvent::Ended {
            turn,
            end: end.clone(),
        }));
        self.presenter.present(PresentationStep::EndOfTurn(&end)).await;

        TurnOutcome::Completed(TurnReport {
            turn,
            player: player_turn,
            enemies: enemy_turns,
            end,
        })
    }

    async fn present_actor(&self, turn: u64, actor_turn: &ActorTurn) {
        self.events.publish(Event::Action(ActionEvent {
            turn,
            actor_turn: actor_turn.clone(),
        }));
        self.presenter
            .present(PresentationStep::Actor { turn, actor_turn })
            .await;
    }

    fn reject(&self, error: TurnError) -> TurnOutcome {
        tracing::debug!(code = error.error_code(), %error, "turn rejected");
        self.events.publish(Event::Turn(TurnEvent::Rejected {
            error: error.clone(),
        }));
        TurnOutcome::Rejected(error)
    }
}

/// Holds the `processing` flag for the duration of one turn.
struct ProcessingGuard {
    shared: Arc<Shared>,
}

impl ProcessingGuard {
    fn acquire(shared: &Arc<Shared>) -> Option<Self> {
        shared
            .processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                shared: Arc::clone(shared),
            })
    }
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.shared.processing.store(false, Ordering::Release);
    }
}

/// State lock for a started turn. Clears `turn.processing` if the turn body
/// unwinds before `end_turn`.
struct InFlight<'a>(MutexGuard<'a, BattleState>);

impl Deref for InFlight<'_> {
    type Target = BattleState;

    fn deref(&self) -> &BattleState {
        &self.0
    }
}

impl DerefMut for InFlight<'_> {
    fn deref_mut(&mut self) -> &mut BattleState {
        &mut self.0
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.0.turn.processing {
            tracing::warn!(turn = self.0.turn.turn_number, "turn abandoned before end of turn");
            self.0.turn.processing = false;
        }
    }
}

/// Builder for [`TurnRunner`].
#[derive(Default)]
pub struct TurnRunnerBuilder {
    state: Option<BattleState>,
    oracles: Option<OracleBundle>,
    presenter: Option<Box<dyn Presenter>>,
    events: Option<EventBus>,
}

impl TurnRunnerBuilder {
    /// Provide the initial battle state
    pub fn state(mut self, state: BattleState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required oracle bundle
    pub fn oracles(mut self, oracles: OracleBundle) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the presenter (defaults to [`NullPresenter`])
    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    /// Share an existing event bus (defaults to a fresh one)
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<TurnRunner> {
        let state = self.state.ok_or(RuntimeError::MissingState)?;
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        if state.roster.player().is_none() {
            return Err(RuntimeError::NoPlayer);
        }
        if state.turn.processing {
            return Err(RuntimeError::StateInFlight {
                turn: state.turn.turn_number,
            });
        }

        tracing::info!(
            seed = state.game_seed,
            combatants = state.roster.len(),
            "turn runner ready"
        );

        let shared = Shared {
            turn_number: AtomicU64::new(state.turn.turn_number),
            state: Mutex::new(state),
            oracles,
            presenter: self
                .presenter
                .unwrap_or_else(|| Box::new(NullPresenter)),
            events: self.events.unwrap_or_default(),
            processing: AtomicBool::new(false),
        };
        Ok(TurnRunner {
            shared: Arc::new(shared),
        })
    }
}
