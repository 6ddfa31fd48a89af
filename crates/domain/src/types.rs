// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// The kinds of records managed by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Department,
    DepartmentHead,
    Faculty,
    Class,
    Division,
    Lab,
    Subject,
}

impl EntityKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::DepartmentHead => "department_head",
            Self::Faculty => "faculty",
            Self::Class => "class",
            Self::Division => "division",
            Self::Lab => "lab",
            Self::Subject => "subject",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = match self {
            Self::Department => "Department",
            Self::DepartmentHead => "Department head",
            Self::Faculty => "Faculty",
            Self::Class => "Class",
            Self::Division => "Division",
            Self::Lab => "Lab",
            Self::Subject => "Subject",
        };
        write!(f, "{label}")
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "department" => Ok(Self::Department),
            "department_head" => Ok(Self::DepartmentHead),
            "faculty" => Ok(Self::Faculty),
            "class" => Ok(Self::Class),
            "division" => Ok(Self::Division),
            "lab" => Ok(Self::Lab),
            "subject" => Ok(Self::Subject),
            _ => Err(format!("Unknown entity kind: '{s}'")),
        }
    }
}

/// The class or division a faculty member coordinates.
///
/// Exactly one payload exists per variant, so a target can never name
/// both a class and a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "target_id", rename_all = "snake_case")]
pub enum CoordinatorTarget {
    Class(i64),
    Division(i64),
}

impl CoordinatorTarget {
    /// Returns the storage key of the target record.
    #[must_use]
    pub const fn target_id(&self) -> i64 {
        match self {
            Self::Class(id) | Self::Division(id) => *id,
        }
    }

    /// Returns the entity kind of the target record.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Class(_) => EntityKind::Class,
            Self::Division(_) => EntityKind::Division,
        }
    }
}

impl std::fmt::Display for CoordinatorTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class(id) => write!(f, "class {id}"),
            Self::Division(id) => write!(f, "division {id}"),
        }
    }
}

/// The scope within which lab roll-number ranges must not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "target_id", rename_all = "snake_case")]
pub enum LabScope {
    /// A class without divisions.
    Class(i64),
    /// A specific division.
    Division(i64),
}

/// An inclusive roll-number range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RollRange {
    start: u32,
    end: u32,
}

impl RollRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `start > end`.
    pub const fn new(start: u32, end: u32) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the first roll number.
    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// Returns the last roll number.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }
}

impl std::fmt::Display for RollRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Which derivation rule to use for a faculty identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacultyIdScheme {
    /// Normalized person name, e.g. `JANE_DOE`.
    #[default]
    NameBased,
    /// `FAC_<initials><email prefix>_<year>`.
    Initials,
}

/// An academic department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Storage key; `None` until persisted.
    pub id: Option<i64>,
    pub name: String,
    /// Derived from the name at creation; never changes.
    pub code: String,
    pub is_active: bool,
}

impl Department {
    /// Creates a new, active, unpersisted department.
    #[must_use]
    pub const fn new(name: String, code: String) -> Self {
        Self {
            id: None,
            name,
            code,
            is_active: true,
        }
    }
}

/// The head of a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentHead {
    pub id: Option<i64>,
    pub name: String,
    /// Normalized to lower case.
    pub email: String,
    /// Derived and permanent.
    pub employee_id: String,
    /// The department this head manages, if assigned.
    pub department: Option<i64>,
    pub management_enabled: bool,
}

impl DepartmentHead {
    /// Creates a new, unpersisted department head.
    #[must_use]
    pub fn new(name: String, email: &str, employee_id: String, department: Option<i64>) -> Self {
        Self {
            id: None,
            name,
            email: normalize_email(email),
            employee_id,
            department,
            management_enabled: true,
        }
    }
}

/// A faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: Option<i64>,
    pub name: String,
    /// Normalized to lower case.
    pub email: String,
    /// Derived and permanent.
    pub faculty_id: String,
    pub assigned_classes: BTreeSet<i64>,
    /// The single class or division this faculty member coordinates.
    pub coordinator_for: Option<CoordinatorTarget>,
}

impl Faculty {
    /// Creates a new, unpersisted faculty member with no assignments.
    #[must_use]
    pub fn new(name: String, email: &str, faculty_id: String) -> Self {
        Self {
            id: None,
            name,
            email: normalize_email(email),
            faculty_id,
            assigned_classes: BTreeSet::new(),
            coordinator_for: None,
        }
    }

    /// Returns whether this faculty member currently coordinates a target.
    #[must_use]
    pub const fn is_class_coordinator(&self) -> bool {
        self.coordinator_for.is_some()
    }
}

/// A class (e.g. "Second Year" for an academic year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: Option<i64>,
    /// Derived and permanent.
    pub class_id: String,
    pub name: String,
    /// Academic year label, e.g. `2025-26`.
    pub year: String,
    /// Child divisions in creation order.
    pub divisions: Vec<i64>,
    pub class_coordinator: Option<i64>,
}

impl Class {
    /// Creates a new, unpersisted class with no divisions.
    #[must_use]
    pub const fn new(class_id: String, name: String, year: String) -> Self {
        Self {
            id: None,
            class_id,
            name,
            year,
            divisions: Vec::new(),
            class_coordinator: None,
        }
    }
}

/// A division of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: Option<i64>,
    /// Derived and permanent.
    pub division_id: String,
    pub name: String,
    /// The class that owns this division.
    pub owner_class: i64,
    pub class_coordinator: Option<i64>,
}

impl Division {
    /// Creates a new, unpersisted division.
    #[must_use]
    pub const fn new(division_id: String, name: String, owner_class: i64) -> Self {
        Self {
            id: None,
            division_id,
            name,
            owner_class,
            class_coordinator: None,
        }
    }
}

/// A lab batch covering a contiguous range of roll numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lab {
    pub id: Option<i64>,
    /// Derived and permanent.
    pub lab_id: String,
    pub name: String,
    pub scope: LabScope,
    pub range: RollRange,
}

impl Lab {
    /// Creates a new, unpersisted lab.
    #[must_use]
    pub const fn new(lab_id: String, name: String, scope: LabScope, range: RollRange) -> Self {
        Self {
            id: None,
            lab_id,
            name,
            scope,
            range,
        }
    }
}

/// A subject taught within a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Option<i64>,
    /// Derived and permanent.
    pub subject_id: String,
    pub name: String,
    pub code: String,
    pub credits: u8,
    pub department: i64,
}

/// Normalizes an email address for case-insensitive uniqueness.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
