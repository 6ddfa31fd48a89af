// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Coordinator assignment rules.
//!
//! A class or division has at most one coordinator, and a faculty member
//! coordinates at most one class or division. The two sides of the link
//! (`class_coordinator` on the target, `coordinator_for` on the faculty)
//! are always written together.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::{Class, CoordinatorTarget, Division, Faculty};

/// The coordinator state of a single class or division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorSlot {
    Unassigned,
    Assigned(i64),
}

impl From<Option<i64>> for CoordinatorSlot {
    fn from(coordinator: Option<i64>) -> Self {
        coordinator.map_or(Self::Unassigned, Self::Assigned)
    }
}

impl CoordinatorSlot {
    /// Returns the coordinating faculty member, if any.
    #[must_use]
    pub const fn coordinator(&self) -> Option<i64> {
        match self {
            Self::Unassigned => None,
            Self::Assigned(faculty) => Some(*faculty),
        }
    }
}

/// Validates `Unassigned -> Assigned(faculty)` for `target`.
///
/// # Arguments
///
/// * `slot` - The current state of the target
/// * `target` - The class or division being assigned
/// * `faculty` - The faculty member's storage key
/// * `faculty_current` - The faculty member's current assignment
///
/// # Errors
///
/// Returns `DomainError::TargetAlreadyCoordinated` if the target is already
/// assigned, or `DomainError::FacultyAlreadyCoordinating` if the faculty
/// member already holds another assignment. The target is checked first.
pub fn validate_assignment(
    slot: CoordinatorSlot,
    target: CoordinatorTarget,
    faculty: i64,
    faculty_current: Option<CoordinatorTarget>,
) -> Result<(), DomainError> {
    if let CoordinatorSlot::Assigned(coordinator) = slot {
        return Err(DomainError::TargetAlreadyCoordinated {
            target,
            coordinator,
        });
    }

    if let Some(current) = faculty_current {
        return Err(DomainError::FacultyAlreadyCoordinating { faculty, current });
    }

    Ok(())
}

/// Validates removal of a faculty member's coordinator assignment.
///
/// Returns the target whose `class_coordinator` must be cleared.
///
/// # Errors
///
/// Returns `DomainError::NotACoordinator` if the faculty member holds none.
pub fn validate_removal(
    faculty: i64,
    faculty_current: Option<CoordinatorTarget>,
) -> Result<CoordinatorTarget, DomainError> {
    match faculty_current {
        Some(target) => Ok(target),
        None => Err(DomainError::NotACoordinator { faculty }),
    }
}

/// Checks that every coordinator link is present on both sides.
///
/// Returns `true` when each faculty `coordinator_for` points at a target
/// whose `class_coordinator` is that faculty member, and each target
/// `class_coordinator` names a faculty member pointing back at it.
#[must_use]
pub fn coordinator_links_consistent(
    faculty: &[Faculty],
    classes: &[Class],
    divisions: &[Division],
) -> bool {
    let slot_of = |target: CoordinatorTarget| -> Option<i64> {
        match target {
            CoordinatorTarget::Class(id) => classes
                .iter()
                .find(|c| c.id == Some(id))
                .and_then(|c| c.class_coordinator),
            CoordinatorTarget::Division(id) => divisions
                .iter()
                .find(|d| d.id == Some(id))
                .and_then(|d| d.class_coordinator),
        }
    };
    let target_of = |faculty_id: i64| -> Option<CoordinatorTarget> {
        faculty
            .iter()
            .find(|f| f.id == Some(faculty_id))
            .and_then(|f| f.coordinator_for)
    };

    let faculty_side_ok: bool = faculty.iter().all(|f| match (f.id, f.coordinator_for) {
        (_, None) => true,
        (Some(id), Some(target)) => slot_of(target) == Some(id),
        (None, Some(_)) => false,
    });

    let class_side_ok: bool = classes.iter().all(|c| match (c.id, c.class_coordinator) {
        (_, None) => true,
        (Some(id), Some(f)) => target_of(f) == Some(CoordinatorTarget::Class(id)),
        (None, Some(_)) => false,
    });

    let division_side_ok: bool = divisions.iter().all(|d| match (d.id, d.class_coordinator) {
        (_, None) => true,
        (Some(id), Some(f)) => target_of(f) == Some(CoordinatorTarget::Division(id)),
        (None, Some(_)) => false,
    });

    faculty_side_ok && class_side_ok && division_side_ok
}
