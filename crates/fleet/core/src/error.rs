//! Common error infrastructure for fleet-core.
//!
//! Domain errors (`StateError`, `GroupError`, `ArenaError`) live next to the
//! types they validate. This module holds the pieces they share.
//!
//! Absence of data (no hostiles in range, a mission without ships, a stale id
//! in a save file) is never an error in this crate. Errors are reserved for
//! collaborator contract violations, such as asking for the state of a ship
//! that was never registered.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the next tick re-evaluates naturally.
    Recoverable,

    /// Invalid input from a collaborator, should not be retried unchanged.
    ///
    /// Examples: ship not registered, state not valid for the owner's faction
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// State is corrupted and the owner cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all fleet-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings suitable for logs and tests
pub trait FleetError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
