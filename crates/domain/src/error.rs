//! Common error types used across the workspace.
//!
//! Each failure kind is its own struct so callers can match on it directly;
//! [`FablineError`] collects them with `#[from]` conversions for propagation
//! across crate boundaries.

/// Umbrella error for every layer of fabline.
#[derive(Debug, thiserror::Error)]
pub enum FablineError {
    #[error("type mismatch")]
    TypeMismatch(#[from] TypeMismatchError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("invalid action")]
    InvalidAction(#[from] InvalidActionError),

    #[error("unimplemented capability")]
    Unimplemented(#[from] UnimplementedCapabilityError),

    /// Failure raised by a storage adapter.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A device of the wrong kind was passed where a specific kind is required.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatchError {
    pub expected: &'static str,
    pub found: String,
}

/// An operation referenced an unknown device or machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// An actuator received an unrecognized action type or payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported action {action_type:?} with payload {payload:?}")]
pub struct InvalidActionError {
    pub action_type: String,
    pub payload: String,
}

/// A capability was invoked on a device variant that does not provide it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{device_type} does not support {capability}")]
pub struct UnimplementedCapabilityError {
    pub capability: &'static str,
    pub device_type: String,
}
