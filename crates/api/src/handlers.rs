// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Every write reads a fresh snapshot from persistence, applies one command
//! to it and persists the resulting mutations in a single transaction.
//! Nothing is cached between requests.

use reflektion::{
    Command, LabPreview, State, TransitionResult, apply, preview_class_id,
    preview_department_code, preview_division_id, preview_employee_id, preview_faculty_id,
    preview_lab, preview_subject_id,
};
use reflektion_domain::{
    Class, Department, Division, Lab, LabScope, UniquenessCheck, require_identifier,
};
use reflektion_persistence::Persistence;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AssignCoordinatorRequest, AssignDepartmentHeadRequest, ClassInfo, ClassRequest,
    CreateClassRequest, CreateDepartmentHeadRequest, CreateDepartmentRequest,
    CreateDivisionRequest, CreateFacultyRequest, CreateLabRequest, CreateResponse,
    CreateSubjectRequest, DepartmentInfo, DivisionInfo, DivisionRequest, FacultyClassRequest,
    FacultyRequest, LabInfo, LabRequest, ListClassesResponse, ListDepartmentsResponse,
    ListLabsRequest, ListLabsResponse, PreviewRequest, PreviewResponse, SetHeadManagementRequest,
    UpdateClassRequest, UpdateDepartmentRequest, UpdateFacultyRequest, UpdateLabRequest,
    WriteResponse,
};

/// Returns the calendar year stamped into year-bearing identifiers.
#[must_use]
pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

/// Loads fresh state, applies `command` and persists the result.
///
/// Returns the transition and the storage keys of inserted records.
fn execute(
    persistence: &mut Persistence,
    command: Command,
) -> Result<(TransitionResult, Vec<i64>), ApiError> {
    let state: State = persistence
        .load_state()
        .map_err(translate_persistence_error)?;
    let result: TransitionResult =
        apply(&state, command, current_year()).map_err(translate_core_error)?;
    let inserted: Vec<i64> = persistence
        .apply_mutations(&result.mutations)
        .map_err(translate_persistence_error)?;

    info!(
        action = %result.action.name,
        details = %result.action.details,
        mutations = result.mutations.len(),
        "Applied command"
    );
    Ok((result, inserted))
}

/// Executes a creating command and reports the new record.
fn execute_create(
    persistence: &mut Persistence,
    command: Command,
) -> Result<CreateResponse, ApiError> {
    let (result, inserted) = execute(persistence, command)?;
    let identifier: String = result
        .inserted()
        .map(|record| record.identifier().to_string())
        .ok_or_else(|| ApiError::Internal {
            message: format!("{} produced no record", result.action.name),
        })?;
    let id: i64 = inserted.first().copied().ok_or_else(|| ApiError::Internal {
        message: format!("{} stored no record", result.action.name),
    })?;

    Ok(CreateResponse {
        id,
        identifier,
        message: result.action.details,
    })
}

/// Executes a non-creating command and reports what it did.
fn execute_write(
    persistence: &mut Persistence,
    command: Command,
) -> Result<WriteResponse, ApiError> {
    let (result, _) = execute(persistence, command)?;
    Ok(WriteResponse {
        message: result.action.details,
    })
}

// ============================================================================
// Departments and heads
// ============================================================================

/// Creates a department.
///
/// # Errors
///
/// Returns an error if the actor is not a super admin, the name is empty,
/// or the write fails.
pub fn create_department(
    persistence: &mut Persistence,
    request: &CreateDepartmentRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateResponse, ApiError> {
    AuthorizationService::authorize_manage_departments(authenticated_actor, "create_department")?;
    execute_create(
        persistence,
        Command::CreateDepartment {
            name: request.name.clone(),
        },
    )
}

/// Renames or (de)activates a department. The department code is kept.
///
/// # Errors
///
/// Returns an error if the actor is not a super admin, the department does
/// not exist, or the write fails.
pub fn update_department(
    persistence: &mut Persistence,
    request: &UpdateDepartmentRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_departments(authenticated_actor, "update_department")?;
    execute_write(
        persistence,
        Command::UpdateDepartment {
            department: request.department,
            name: request.name.clone(),
            is_active: request.is_active,
        },
    )
}

/// Registers a department head.
///
/// # Errors
///
/// Returns an error if the actor is not a super admin, the name or email is
/// invalid, the email is taken, the department already has a head, or the
/// write fails.
pub fn create_department_head(
    persistence: &mut Persistence,
    request: &CreateDepartmentHeadRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateResponse, ApiError> {
    AuthorizationService::authorize_manage_departments(
        authenticated_actor,
        "create_department_head",
    )?;
    execute_create(
        persistence,
        Command::CreateDepartmentHead {
            name: request.name.clone(),
            email: request.email.clone(),
            department: request.department,
        },
    )
}

/// Makes a head responsible for a department.
///
/// # Errors
///
/// Returns an error if the actor is not a super admin, either record is
/// missing, the department already has another head, or the write fails.
pub fn assign_department_head(
    persistence: &mut Persistence,
    request: &AssignDepartmentHeadRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_departments(
        authenticated_actor,
        "assign_department_head",
    )?;
    execute_write(
        persistence,
        Command::AssignDepartmentHead {
            head: request.head,
            department: request.department,
        },
    )
}

/// Enables or disables a head's management rights.
///
/// # Errors
///
/// Returns an error if the actor is not a super admin, the head does not
/// exist, or the write fails.
pub fn set_head_management(
    persistence: &mut Persistence,
    request: &SetHeadManagementRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_departments(authenticated_actor, "set_head_management")?;
    execute_write(
        persistence,
        Command::SetHeadManagement {
            head: request.head,
            enabled: request.enabled,
        },
    )
}

// ============================================================================
// Faculty
// ============================================================================

/// Registers a faculty member.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the name or
/// email is invalid, the email is taken, or the write fails.
pub fn create_faculty(
    persistence: &mut Persistence,
    request: &CreateFacultyRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "create_faculty")?;
    execute_create(
        persistence,
        Command::CreateFaculty {
            name: request.name.clone(),
            email: request.email.clone(),
            scheme: request.scheme,
        },
    )
}

/// Changes a faculty member's name or email. The faculty ID is kept.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the member does
/// not exist, the email is invalid or taken, or the write fails.
pub fn update_faculty(
    persistence: &mut Persistence,
    request: &UpdateFacultyRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "update_faculty")?;
    execute_write(
        persistence,
        Command::UpdateFaculty {
            faculty: request.faculty,
            name: request.name.clone(),
            email: request.email.clone(),
        },
    )
}

/// Deletes a faculty member, clearing any coordinator slot they held.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the member does
/// not exist, or the write fails.
pub fn delete_faculty(
    persistence: &mut Persistence,
    request: &FacultyRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "delete_faculty")?;
    execute_write(
        persistence,
        Command::DeleteFaculty {
            faculty: request.faculty,
        },
    )
}

/// Adds a class to a faculty member's teaching assignments.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, either record is
/// missing, or the write fails.
pub fn assign_faculty_class(
    persistence: &mut Persistence,
    request: &FacultyClassRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "assign_faculty_class")?;
    execute_write(
        persistence,
        Command::AssignFacultyClass {
            faculty: request.faculty,
            class: request.class,
        },
    )
}

/// Removes a class from a faculty member's teaching assignments.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, either record is
/// missing, or the write fails.
pub fn unassign_faculty_class(
    persistence: &mut Persistence,
    request: &FacultyClassRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(
        authenticated_actor,
        "unassign_faculty_class",
    )?;
    execute_write(
        persistence,
        Command::UnassignFacultyClass {
            faculty: request.faculty,
            class: request.class,
        },
    )
}

// ============================================================================
// Classes and divisions
// ============================================================================

/// Creates a class.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the name or
/// year is empty, or the write fails.
pub fn create_class(
    persistence: &mut Persistence,
    request: &CreateClassRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "create_class")?;
    execute_create(
        persistence,
        Command::CreateClass {
            name: request.name.clone(),
            year: request.year.clone(),
        },
    )
}

/// Renames a class or changes its year label. The class ID is kept.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the class does
/// not exist, or the write fails.
pub fn update_class(
    persistence: &mut Persistence,
    request: &UpdateClassRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "update_class")?;
    execute_write(
        persistence,
        Command::UpdateClass {
            class: request.class,
            name: request.name.clone(),
            year: request.year.clone(),
        },
    )
}

/// Deletes a class with its divisions and labs.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the class does
/// not exist, or the write fails.
pub fn delete_class(
    persistence: &mut Persistence,
    request: &ClassRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "delete_class")?;
    execute_write(
        persistence,
        Command::DeleteClass {
            class: request.class,
        },
    )
}

/// Adds a division to a class.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the class does
/// not exist or already has class-scoped labs, or the write fails.
pub fn create_division(
    persistence: &mut Persistence,
    request: &CreateDivisionRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "create_division")?;
    execute_create(
        persistence,
        Command::CreateDivision {
            class: request.class,
            name: request.name.clone(),
        },
    )
}

/// Deletes a division with its labs.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the division
/// does not exist, or the write fails.
pub fn delete_division(
    persistence: &mut Persistence,
    request: &DivisionRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "delete_division")?;
    execute_write(
        persistence,
        Command::DeleteDivision {
            division: request.division,
        },
    )
}

// ============================================================================
// Labs
// ============================================================================

/// Creates a lab.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the scope does
/// not exist, the range is inverted or overlaps another lab in the scope,
/// or the write fails.
pub fn create_lab(
    persistence: &mut Persistence,
    request: &CreateLabRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "create_lab")?;
    execute_create(
        persistence,
        Command::CreateLab {
            scope: request.scope,
            name: request.name.clone(),
            start: request.start,
            end: request.end,
        },
    )
}

/// Renames a lab or moves its range. The lab ID is kept.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the lab does not
/// exist, the new range is invalid or overlaps another lab, or the write
/// fails.
pub fn update_lab(
    persistence: &mut Persistence,
    request: &UpdateLabRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "update_lab")?;
    execute_write(
        persistence,
        Command::UpdateLab {
            lab: request.lab,
            name: request.name.clone(),
            start: request.start,
            end: request.end,
        },
    )
}

/// Deletes a lab.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the lab does not
/// exist, or the write fails.
pub fn delete_lab(
    persistence: &mut Persistence,
    request: &LabRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "delete_lab")?;
    execute_write(persistence, Command::DeleteLab { lab: request.lab })
}

// ============================================================================
// Subjects and coordinators
// ============================================================================

/// Creates a subject.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the department
/// does not exist, the credits are zero, or the write fails.
pub fn create_subject(
    persistence: &mut Persistence,
    request: &CreateSubjectRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "create_subject")?;
    execute_create(
        persistence,
        Command::CreateSubject {
            name: request.name.clone(),
            code: request.code.clone(),
            credits: request.credits,
            department: request.department,
        },
    )
}

/// Makes a faculty member the coordinator of a class or division.
///
/// Both sides of the link are written in one transaction.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, either record is
/// missing, the target already has a coordinator, the member already
/// coordinates elsewhere, or the write fails.
pub fn assign_coordinator(
    persistence: &mut Persistence,
    request: &AssignCoordinatorRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "assign_coordinator")?;
    execute_write(
        persistence,
        Command::AssignCoordinator {
            faculty: request.faculty,
            target: request.target,
        },
    )
}

/// Clears a faculty member's coordinator assignment.
///
/// # Errors
///
/// Returns an error if the actor may not manage academics, the member does
/// not exist or coordinates nothing, or the write fails.
pub fn remove_coordinator(
    persistence: &mut Persistence,
    request: &FacultyRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_academics(authenticated_actor, "remove_coordinator")?;
    execute_write(
        persistence,
        Command::RemoveCoordinator {
            faculty: request.faculty,
        },
    )
}

// ============================================================================
// Previews
// ============================================================================

/// Previews the identifier a new record would receive.
///
/// The preview is advisory: a concurrent write may claim the identifier
/// before the record is created, in which case the create reports a
/// conflict.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the inputs yield no identifier, or
/// `ApiError::ResourceNotFound` if a referenced class or division is missing.
pub fn preview_identifier(
    persistence: &mut Persistence,
    request: &PreviewRequest,
) -> Result<PreviewResponse, ApiError> {
    let state: State = persistence
        .load_state()
        .map_err(translate_persistence_error)?;
    let year: i32 = current_year();

    let (field, check, next_available_start): (&'static str, UniquenessCheck, Option<u32>) =
        match request {
            PreviewRequest::Department { name } => {
                ("name", preview_department_code(&state, name), None)
            }
            PreviewRequest::DepartmentHead { name } => {
                ("name", preview_employee_id(&state, name), None)
            }
            PreviewRequest::Faculty {
                name,
                email,
                scheme,
            } => (
                "name",
                preview_faculty_id(&state, name, email, *scheme, year),
                None,
            ),
            PreviewRequest::Class { name, year: label } => {
                ("name", preview_class_id(&state, name, label), None)
            }
            PreviewRequest::Division { class, name } => (
                "name",
                preview_division_id(&state, *class, name, year).map_err(translate_domain_error)?,
                None,
            ),
            PreviewRequest::Lab { scope, name } => {
                let preview: LabPreview =
                    preview_lab(&state, *scope, name, year).map_err(translate_domain_error)?;
                ("name", preview.check, Some(preview.next_available_start))
            }
            PreviewRequest::Subject { code, name } => {
                ("code", preview_subject_id(&state, code, name), None)
            }
        };

    let resolved_id: String =
        require_identifier(field, check.resolved_id).map_err(translate_domain_error)?;
    debug!(%resolved_id, is_unique = check.is_unique, "Previewed identifier");

    Ok(PreviewResponse {
        is_unique: check.is_unique,
        resolved_id,
        next_available_start,
    })
}

// ============================================================================
// Listing
// ============================================================================

/// Lists every department.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_departments(
    persistence: &mut Persistence,
) -> Result<ListDepartmentsResponse, ApiError> {
    let departments: Vec<Department> = persistence
        .list_departments()
        .map_err(translate_persistence_error)?;

    Ok(ListDepartmentsResponse {
        departments: departments
            .into_iter()
            .filter_map(|d| {
                Some(DepartmentInfo {
                    id: d.id?,
                    name: d.name,
                    code: d.code,
                    is_active: d.is_active,
                })
            })
            .collect(),
    })
}

/// Lists every class with its divisions.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_classes(persistence: &mut Persistence) -> Result<ListClassesResponse, ApiError> {
    let classes: Vec<Class> = persistence
        .list_classes()
        .map_err(translate_persistence_error)?;
    let divisions: Vec<Division> = persistence
        .list_divisions(None)
        .map_err(translate_persistence_error)?;

    let classes: Vec<ClassInfo> = classes
        .into_iter()
        .filter_map(|c| {
            let id: i64 = c.id?;
            Some(ClassInfo {
                id,
                class_id: c.class_id,
                name: c.name,
                year: c.year,
                class_coordinator: c.class_coordinator,
                divisions: divisions
                    .iter()
                    .filter(|d| d.owner_class == id)
                    .filter_map(|d| {
                        Some(DivisionInfo {
                            id: d.id?,
                            division_id: d.division_id.clone(),
                            name: d.name.clone(),
                            class_coordinator: d.class_coordinator,
                        })
                    })
                    .collect(),
            })
        })
        .collect();

    Ok(ListClassesResponse { classes })
}

/// Lists labs, optionally only those in one class or division.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if both a class and a division are
/// given, or an error if the query fails.
pub fn list_labs(
    persistence: &mut Persistence,
    request: &ListLabsRequest,
) -> Result<ListLabsResponse, ApiError> {
    let scope: Option<LabScope> = match (request.class, request.division) {
        (Some(_), Some(_)) => {
            return Err(ApiError::InvalidInput {
                field: String::from("scope"),
                message: String::from("Filter by a class or a division, not both"),
            });
        }
        (Some(class), None) => Some(LabScope::Class(class)),
        (None, Some(division)) => Some(LabScope::Division(division)),
        (None, None) => None,
    };

    let labs: Vec<Lab> = persistence
        .list_labs(scope)
        .map_err(translate_persistence_error)?;

    Ok(ListLabsResponse {
        labs: labs
            .into_iter()
            .filter_map(|l| {
                Some(LabInfo {
                    id: l.id?,
                    lab_id: l.lab_id,
                    name: l.name,
                    scope: l.scope,
                    start: l.range.start(),
                    end: l.range.end(),
                })
            })
            .collect(),
    })
}
