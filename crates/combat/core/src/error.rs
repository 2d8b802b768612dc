//! Common error infrastructure for combat-core.
//!
//! Combat never halts the turn loop: invalid requests degrade to no-op
//! outcomes. The error types defined next to the operations they guard are
//! used for internal validation and for reporting why an action did nothing.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected runtime condition; the caller may retry or pick another action.
    ///
    /// Examples: re-entrant turn request, target already defeated
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: actor not on the roster
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// State can no longer be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, stable across releases.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
