// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use reflektion::CoreError;
use reflektion_domain::DomainError;
use reflektion_persistence::PersistenceError;
use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description.
        message: String,
    },
    /// A concurrent writer claimed an identifier or email first.
    Conflict {
        /// A human-readable description.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A human-readable description.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// Domain errors are mapped to API errors explicitly so internal details
/// never become part of the API contract.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::EmptyInput { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::DuplicateIdentifier { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_identifier"),
            message,
        },
        DomainError::DuplicateEmail { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message,
        },
        DomainError::InvalidEmail(_) => ApiError::InvalidInput {
            field: String::from("email"),
            message,
        },
        DomainError::InvalidRange { .. } => ApiError::InvalidInput {
            field: String::from("range"),
            message,
        },
        DomainError::RangeOverlap { .. } => ApiError::DomainRuleViolation {
            rule: String::from("non_overlapping_lab_ranges"),
            message,
        },
        DomainError::TargetAlreadyCoordinated { .. } => ApiError::DomainRuleViolation {
            rule: String::from("single_coordinator_per_target"),
            message,
        },
        DomainError::FacultyAlreadyCoordinating { .. } => ApiError::DomainRuleViolation {
            rule: String::from("single_target_per_coordinator"),
            message,
        },
        DomainError::NotACoordinator { .. } => ApiError::DomainRuleViolation {
            rule: String::from("coordinator_assigned"),
            message,
        },
        DomainError::DepartmentAlreadyHeaded { .. } => ApiError::DomainRuleViolation {
            rule: String::from("single_head_per_department"),
            message,
        },
        DomainError::ClassHasDivisions { .. } | DomainError::ClassHasLabs { .. } => {
            ApiError::DomainRuleViolation {
                rule: String::from("exclusive_lab_scope"),
                message,
            }
        }
        DomainError::InvalidCredits(_) => ApiError::InvalidInput {
            field: String::from("credits"),
            message,
        },
        DomainError::NotFound { kind, .. } => ApiError::ResourceNotFound {
            resource_type: kind.to_string(),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// A unique constraint violation at write time means another writer took
/// the identifier after this request read its state; the caller may retry.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateIdentifier(detail) => ApiError::Conflict {
            message: format!(
                "An identifier or email was claimed by a concurrent change ({detail}); please retry"
            ),
        },
        PersistenceError::RecordNotFound { table, id } => ApiError::ResourceNotFound {
            resource_type: table.to_string(),
            message: format!("No record with id {id}"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
