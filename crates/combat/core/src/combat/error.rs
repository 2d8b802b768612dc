use crate::env::OracleError;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::EntityId;

/// Why a request could not be resolved.
///
/// These never escape the resolver: they become a no-op outcome carrying the
/// error as its reason.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    #[error("actor {0} is not on the roster")]
    ActorNotFound(EntityId),

    #[error("actor {0} is defeated")]
    ActorDefeated(EntityId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CombatError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ResolveError::ActorDefeated(_) => ErrorSeverity::Recoverable,
            ResolveError::ActorNotFound(_) => ErrorSeverity::Validation,
            ResolveError::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ResolveError::ActorNotFound(_) => "RESOLVE_ACTOR_NOT_FOUND",
            ResolveError::ActorDefeated(_) => "RESOLVE_ACTOR_DEFEATED",
            ResolveError::Oracle(err) => err.error_code(),
        }
    }
}
