// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles form a hierarchy of write access. Every role may read and
/// preview identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Developer role: unrestricted access, used for maintenance.
    Developer,
    /// Super admin role: institution-wide administration.
    ///
    /// Super admins may:
    /// - create, rename and deactivate departments
    /// - register department heads and assign them to departments
    /// - enable or disable a head's management rights
    /// - everything a department head may do
    SuperAdmin,
    /// Department head role: academic administration.
    ///
    /// Department heads may manage faculty, classes, divisions, labs,
    /// subjects and coordinator assignments.
    DepartmentHead,
    /// Faculty role: read-only.
    Faculty,
}

impl Role {
    /// Returns the canonical name of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::SuperAdmin => "super_admin",
            Self::DepartmentHead => "department_head",
            Self::Faculty => "faculty",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "developer" => Ok(Self::Developer),
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            "department_head" | "departmenthead" => Ok(Self::DepartmentHead),
            "faculty" => Ok(Self::Faculty),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role: '{s}'"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may manage departments and department heads.
    ///
    /// Only Developer and `SuperAdmin` actors may do so.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// Returns an error if the actor's role is insufficient.
    pub fn authorize_manage_departments(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Developer | Role::SuperAdmin => Ok(()),
            Role::DepartmentHead | Role::Faculty => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("SuperAdmin"),
            }),
        }
    }

    /// Checks if an actor may manage academic records: faculty, classes,
    /// divisions, labs, subjects and coordinator assignments.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has the Faculty role.
    pub fn authorize_manage_academics(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Developer | Role::SuperAdmin | Role::DepartmentHead => Ok(()),
            Role::Faculty => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("DepartmentHead"),
            }),
        }
    }
}

/// Stub authentication for callers that supply the actor directly.
///
/// Credential checks happen outside this system; this only rejects an
/// empty actor ID.
///
/// # Arguments
///
/// * `actor_id` - The actor's unique identifier
/// * `role` - The actor's role
///
/// # Errors
///
/// Returns an error if `actor_id` is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
