//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., [`crate::PathError`]) are defined next to the
//! operations that produce them. Nothing in this crate is fatal to a frame:
//! systems recover locally and these types exist so callers can log *why*.

use crate::state::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions that may succeed on a later frame
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted game state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Examples: goal currently unreachable, target out of sight.
    Recoverable,

    /// Examples: path request outside the map, start on a wall.
    Validation,

    /// These indicate bugs and should be investigated.
    Internal,

    /// Game state corrupted, cannot continue.
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

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Component kinds a system or node may depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    Transform,
    Vision,
    Ai,
    Collider,
    MovementIntent,
}

/// An entity lacks a component the current step needs.
///
/// Entities legitimately differ in what they carry, so this never aborts a
/// frame: the node returns `Failure` or the system skips the entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("entity {entity} has no {capability} component")]
pub struct MissingCapability {
    pub entity: EntityId,
    pub capability: Capability,
}

impl MissingCapability {
    pub const fn new(entity: EntityId, capability: Capability) -> Self {
        Self { entity, capability }
    }
}

impl GameError for MissingCapability {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "MISSING_CAPABILITY"
    }
}
