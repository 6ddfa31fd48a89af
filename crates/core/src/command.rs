// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reflektion_domain::{CoordinatorTarget, FacultyIdScheme, LabScope};

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes. Record references
/// are storage keys, never derived identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a department; its code is derived from the name.
    CreateDepartment { name: String },
    /// Rename or (de)activate a department. The code never changes.
    UpdateDepartment {
        department: i64,
        name: String,
        is_active: bool,
    },
    /// Register a department head, optionally assigned to a department.
    CreateDepartmentHead {
        name: String,
        email: String,
        department: Option<i64>,
    },
    /// Make a head responsible for a department.
    AssignDepartmentHead { head: i64, department: i64 },
    /// Enable or disable a head's management rights.
    SetHeadManagement { head: i64, enabled: bool },
    /// Register a faculty member.
    CreateFaculty {
        name: String,
        email: String,
        scheme: FacultyIdScheme,
    },
    /// Change a faculty member's name or email.
    UpdateFaculty {
        faculty: i64,
        name: String,
        email: String,
    },
    /// Add a class to a faculty member's teaching assignments.
    AssignFacultyClass { faculty: i64, class: i64 },
    /// Remove a class from a faculty member's teaching assignments.
    UnassignFacultyClass { faculty: i64, class: i64 },
    /// Delete a faculty member, clearing any coordinator assignment.
    DeleteFaculty { faculty: i64 },
    /// Create a class for an academic year.
    CreateClass { name: String, year: String },
    /// Rename a class or change its year label. The class ID never changes.
    UpdateClass {
        class: i64,
        name: String,
        year: String,
    },
    /// Delete a class together with its divisions and labs.
    DeleteClass { class: i64 },
    /// Add a division to a class.
    CreateDivision { class: i64, name: String },
    /// Delete a division together with its labs.
    DeleteDivision { division: i64 },
    /// Create a lab covering a roll-number range within a scope.
    CreateLab {
        scope: LabScope,
        name: String,
        start: u32,
        end: u32,
    },
    /// Rename a lab or move its roll-number range.
    UpdateLab {
        lab: i64,
        name: String,
        start: u32,
        end: u32,
    },
    /// Delete a lab.
    DeleteLab { lab: i64 },
    /// Create a subject within a department.
    CreateSubject {
        name: String,
        code: String,
        credits: u8,
        department: i64,
    },
    /// Make a faculty member the coordinator of a class or division.
    AssignCoordinator {
        faculty: i64,
        target: CoordinatorTarget,
    },
    /// Clear a faculty member's coordinator assignment.
    RemoveCoordinator { faculty: i64 },
}

impl Command {
    /// Returns the name used for this command in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateDepartment { .. } => "CreateDepartment",
            Self::UpdateDepartment { .. } => "UpdateDepartment",
            Self::CreateDepartmentHead { .. } => "CreateDepartmentHead",
            Self::AssignDepartmentHead { .. } => "AssignDepartmentHead",
            Self::SetHeadManagement { .. } => "SetHeadManagement",
            Self::CreateFaculty { .. } => "CreateFaculty",
            Self::UpdateFaculty { .. } => "UpdateFaculty",
            Self::AssignFacultyClass { .. } => "AssignFacultyClass",
            Self::UnassignFacultyClass { .. } => "UnassignFacultyClass",
            Self::DeleteFaculty { .. } => "DeleteFaculty",
            Self::CreateClass { .. } => "CreateClass",
            Self::UpdateClass { .. } => "UpdateClass",
            Self::DeleteClass { .. } => "DeleteClass",
            Self::CreateDivision { .. } => "CreateDivision",
            Self::DeleteDivision { .. } => "DeleteDivision",
            Self::CreateLab { .. } => "CreateLab",
            Self::UpdateLab { .. } => "UpdateLab",
            Self::DeleteLab { .. } => "DeleteLab",
            Self::CreateSubject { .. } => "CreateSubject",
            Self::AssignCoordinator { .. } => "AssignCoordinator",
            Self::RemoveCoordinator { .. } => "RemoveCoordinator",
        }
    }
}
