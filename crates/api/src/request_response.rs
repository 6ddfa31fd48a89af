// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Records are referenced by storage key. Derived identifiers are only
//! ever returned, never accepted as references.

use reflektion_domain::{CoordinatorTarget, FacultyIdScheme, LabScope};
use serde::{Deserialize, Serialize};

// ============================================================================
// Departments
// ============================================================================

/// API request to create a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    /// The department name; the code is derived from it.
    pub name: String,
}

/// API request to rename or (de)activate a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub department: i64,
    pub name: String,
    pub is_active: bool,
}

/// A department as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentInfo {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub is_active: bool,
}

/// API response listing departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDepartmentsResponse {
    pub departments: Vec<DepartmentInfo>,
}

// ============================================================================
// Department heads
// ============================================================================

/// API request to register a department head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDepartmentHeadRequest {
    pub name: String,
    pub email: String,
    /// The department to assign immediately, if any.
    #[serde(default)]
    pub department: Option<i64>,
}

/// API request to make a head responsible for a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignDepartmentHeadRequest {
    pub head: i64,
    pub department: i64,
}

/// API request to enable or disable a head's management rights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetHeadManagementRequest {
    pub head: i64,
    pub enabled: bool,
}

// ============================================================================
// Faculty
// ============================================================================

/// API request to register a faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFacultyRequest {
    pub name: String,
    pub email: String,
    /// Which faculty ID rule to use. Defaults to the name-based rule.
    #[serde(default)]
    pub scheme: FacultyIdScheme,
}

/// API request to change a faculty member's name or email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFacultyRequest {
    pub faculty: i64,
    pub name: String,
    pub email: String,
}

/// API request addressing one faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyRequest {
    pub faculty: i64,
}

/// API request to add or remove a teaching assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyClassRequest {
    pub faculty: i64,
    pub class: i64,
}

// ============================================================================
// Classes and divisions
// ============================================================================

/// API request to create a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    /// Academic year label, e.g. `2025-26`.
    pub year: String,
}

/// API request to rename a class or change its year label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateClassRequest {
    pub class: i64,
    pub name: String,
    pub year: String,
}

/// API request addressing one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRequest {
    pub class: i64,
}

/// API request to add a division to a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDivisionRequest {
    pub class: i64,
    pub name: String,
}

/// API request addressing one division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionRequest {
    pub division: i64,
}

/// A division as returned within a class listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionInfo {
    pub id: i64,
    pub division_id: String,
    pub name: String,
    pub class_coordinator: Option<i64>,
}

/// A class with its divisions, as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: i64,
    pub class_id: String,
    pub name: String,
    pub year: String,
    pub class_coordinator: Option<i64>,
    /// Divisions in creation order.
    pub divisions: Vec<DivisionInfo>,
}

/// API response listing classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListClassesResponse {
    pub classes: Vec<ClassInfo>,
}

// ============================================================================
// Labs
// ============================================================================

/// API request to create a lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLabRequest {
    pub scope: LabScope,
    pub name: String,
    /// First roll number, inclusive.
    pub start: u32,
    /// Last roll number, inclusive.
    pub end: u32,
}

/// API request to rename a lab or move its range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLabRequest {
    pub lab: i64,
    pub name: String,
    pub start: u32,
    pub end: u32,
}

/// API request addressing one lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabRequest {
    pub lab: i64,
}

/// API request to list labs.
///
/// At most one of `class` and `division` may be given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLabsRequest {
    #[serde(default)]
    pub class: Option<i64>,
    #[serde(default)]
    pub division: Option<i64>,
}

/// A lab as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabInfo {
    pub id: i64,
    pub lab_id: String,
    pub name: String,
    pub scope: LabScope,
    pub start: u32,
    pub end: u32,
}

/// API response listing labs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLabsResponse {
    pub labs: Vec<LabInfo>,
}

// ============================================================================
// Subjects and coordinators
// ============================================================================

/// API request to create a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub credits: u8,
    pub department: i64,
}

/// API request to make a faculty member a coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignCoordinatorRequest {
    pub faculty: i64,
    pub target: CoordinatorTarget,
}

// ============================================================================
// Previews
// ============================================================================

/// API request to preview the identifier a new record would receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewRequest {
    Department {
        name: String,
    },
    DepartmentHead {
        name: String,
    },
    Faculty {
        name: String,
        #[serde(default)]
        email: String,
        #[serde(default)]
        scheme: FacultyIdScheme,
    },
    Class {
        name: String,
        year: String,
    },
    Division {
        class: i64,
        name: String,
    },
    Lab {
        scope: LabScope,
        name: String,
    },
    Subject {
        code: String,
        name: String,
    },
}

/// API response for an identifier preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Whether `resolved_id` is currently free.
    pub is_unique: bool,
    /// The identifier the record would receive if created now.
    pub resolved_id: String,
    /// For labs, the first roll number after the scope's last range.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_available_start: Option<u32>,
}

// ============================================================================
// Write results
// ============================================================================

/// API response for a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    /// The storage key of the new record.
    pub id: i64,
    /// The derived identifier stored with the record.
    pub identifier: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful update, delete or assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    /// A success message.
    pub message: String,
}
