//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Field-level validation failure.
///
/// These are surfaced verbatim to the end user (e.g. next to the offending
/// form field) and are never silently defaulted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field carried a value outside its enumerated set.
    #[error("invalid value for {field}: {value:?}")]
    InvalidEnum { field: &'static str, value: String },

    /// Any other malformed input (e.g. a zero quantity).
    #[error("{0}")]
    Invalid(String),
}

impl ValidationError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField(field) => Some(*field),
            ValidationError::InvalidEnum { field, .. } => Some(*field),
            ValidationError::Invalid(_) => None,
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, illegal transitions). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A lifecycle action was requested from a state that does not permit it.
    ///
    /// Callers refetch the record and decide again; this is never fatal.
    #[error("invalid transition: cannot {action} a record in status {from}")]
    InvalidTransition {
        action: &'static str,
        from: &'static str,
    },

    /// User input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A caller contract was broken (negative price, discount outside 0..=100).
    ///
    /// Indicates an upstream data bug rather than a user-triggerable state.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A conflict occurred (e.g. an out-of-stock variant).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn invalid_transition(action: &'static str, from: &'static str) -> Self {
        Self::InvalidTransition { action, from }
    }

    pub fn missing_field(field: &'static str) -> Self {
        Self::Validation(ValidationError::MissingField(field))
    }

    pub fn invalid_enum(field: &'static str, value: impl Into<String>) -> Self {
        Self::Validation(ValidationError::InvalidEnum {
            field,
            value: value.into(),
        })
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::Invalid(msg.into()))
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Stable machine-readable code, used as the `code` field of API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidTransition { .. } => "invalid_transition",
            DomainError::Validation(ValidationError::MissingField(_)) => "missing_field",
            DomainError::Validation(ValidationError::InvalidEnum { .. }) => "invalid_enum",
            DomainError::Validation(ValidationError::Invalid(_)) => "validation_error",
            DomainError::Precondition(_) => "precondition_failed",
            DomainError::InvariantViolation(_) => "invariant_violation",
            DomainError::InvalidId(_) => "invalid_id",
            DomainError::Conflict(_) => "conflict",
            DomainError::NotFound => "not_found",
        }
    }

    /// HTTP status an API layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            DomainError::InvalidTransition { .. } | DomainError::Conflict(_) => 409,
            DomainError::Validation(_) | DomainError::InvariantViolation(_) => 422,
            DomainError::Precondition(_) | DomainError::InvalidId(_) => 400,
            DomainError::NotFound => 404,
        }
    }

    /// Whether refetching the record and deciding again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidTransition { .. } | DomainError::Conflict(_)
        )
    }
}
