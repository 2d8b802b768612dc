//! Errors surfaced while assembling a runner.
//!
//! Turn execution itself never fails: rejected turns and degraded actions are
//! reported through [`combat_core::TurnOutcome`].
use combat_core::{CombatError, ErrorSeverity};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runner requires a battle state before building")]
    MissingState,

    #[error("runner requires oracles to be configured before building")]
    MissingOracles,

    #[error("battle state has no player combatant")]
    NoPlayer,

    #[error("battle state is mid-turn (turn {turn} still processing)")]
    StateInFlight { turn: u64 },
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::MissingState | RuntimeError::MissingOracles => ErrorSeverity::Internal,
            RuntimeError::NoPlayer | RuntimeError::StateInFlight { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::MissingState => "RUNTIME_MISSING_STATE",
            RuntimeError::MissingOracles => "RUNTIME_MISSING_ORACLES",
            RuntimeError::NoPlayer => "RUNTIME_NO_PLAYER",
            RuntimeError::StateInFlight { .. } => "RUNTIME_STATE_IN_FLIGHT",
        }
    }
}
