// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Reflektion.
//!
//! Handlers authorize the actor, read a fresh snapshot, apply one command
//! and persist its mutations. Domain, core and persistence errors are
//! translated into [`ApiError`] explicitly.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    assign_coordinator, assign_department_head, assign_faculty_class, create_class,
    create_department, create_department_head, create_division, create_faculty, create_lab,
    create_subject, current_year, delete_class, delete_division, delete_faculty, delete_lab,
    list_classes, list_departments, list_labs, preview_identifier, remove_coordinator,
    set_head_management, unassign_faculty_class, update_class, update_department,
    update_faculty, update_lab,
};
pub use request_response::{
    AssignCoordinatorRequest, AssignDepartmentHeadRequest, ClassInfo, ClassRequest,
    CreateClassRequest, CreateDepartmentHeadRequest, CreateDepartmentRequest,
    CreateDivisionRequest, CreateFacultyRequest, CreateLabRequest, CreateResponse,
    CreateSubjectRequest, DepartmentInfo, DivisionInfo, DivisionRequest, FacultyClassRequest,
    FacultyRequest, LabInfo, LabRequest, ListClassesResponse, ListDepartmentsResponse,
    ListLabsRequest, ListLabsResponse, PreviewRequest, PreviewResponse, SetHeadManagementRequest,
    UpdateClassRequest, UpdateDepartmentRequest, UpdateFacultyRequest, UpdateLabRequest,
    WriteResponse,
};
