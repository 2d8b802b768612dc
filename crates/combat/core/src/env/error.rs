use crate::error::{CombatError, ErrorSeverity};

/// A collaborator required by a resolution was not supplied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("TerrainOracle not available")]
    TerrainNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // A missing oracle only degrades the action to a no-op.
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::TerrainNotAvailable => "ORACLE_TERRAIN_NOT_AVAILABLE",
            OracleError::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
