//! Error types for the turn sequencer.

use crate::error::{CombatError, ErrorSeverity};

/// Why a turn did not start.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("turn {turn} is still processing")]
    AlreadyProcessing { turn: u64 },

    /// The task driving the turn was torn down before it finished.
    #[error("turn {turn} was interrupted")]
    Interrupted { turn: u64 },
}

impl CombatError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::AlreadyProcessing { .. } => "TURN_ALREADY_PROCESSING",
            TurnError::Interrupted { .. } => "TURN_INTERRUPTED",
        }
    }
}
