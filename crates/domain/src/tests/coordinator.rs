// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Class, CoordinatorSlot, CoordinatorTarget, Division, DomainError, Faculty,
    coordinator_links_consistent, validate_assignment, validate_removal,
};

fn create_test_faculty(id: i64, coordinator_for: Option<CoordinatorTarget>) -> Faculty {
    let mut faculty: Faculty = Faculty::new(
        format!("Faculty {id}"),
        &format!("f{id}@college.edu"),
        format!("FACULTY_{id}"),
    );
    faculty.id = Some(id);
    faculty.coordinator_for = coordinator_for;
    faculty
}

fn create_test_division(id: i64, coordinator: Option<i64>) -> Division {
    let mut division: Division = Division::new(format!("DIV_{id}"), format!("D{id}"), 1);
    division.id = Some(id);
    division.class_coordinator = coordinator;
    division
}

#[test]
fn test_slot_from_option() {
    assert_eq!(CoordinatorSlot::from(None), CoordinatorSlot::Unassigned);
    assert_eq!(CoordinatorSlot::from(Some(3)), CoordinatorSlot::Assigned(3));
    assert_eq!(CoordinatorSlot::Assigned(3).coordinator(), Some(3));
}

#[test]
fn test_assign_to_unassigned_target_succeeds() {
    let result: Result<(), DomainError> = validate_assignment(
        CoordinatorSlot::Unassigned,
        CoordinatorTarget::Division(10),
        1,
        None,
    );
    assert!(result.is_ok());
}

#[test]
fn test_assign_to_coordinated_target_fails() {
    let result: Result<(), DomainError> = validate_assignment(
        CoordinatorSlot::Assigned(1),
        CoordinatorTarget::Division(10),
        2,
        None,
    );
    assert_eq!(
        result,
        Err(DomainError::TargetAlreadyCoordinated {
            target: CoordinatorTarget::Division(10),
            coordinator: 1,
        })
    );
}

#[test]
fn test_assign_busy_faculty_fails() {
    let result: Result<(), DomainError> = validate_assignment(
        CoordinatorSlot::Unassigned,
        CoordinatorTarget::Division(11),
        1,
        Some(CoordinatorTarget::Division(10)),
    );
    assert_eq!(
        result,
        Err(DomainError::FacultyAlreadyCoordinating {
            faculty: 1,
            current: CoordinatorTarget::Division(10),
        })
    );
}

#[test]
fn test_reassigning_same_pair_reports_target_first() {
    let result: Result<(), DomainError> = validate_assignment(
        CoordinatorSlot::Assigned(1),
        CoordinatorTarget::Class(5),
        1,
        Some(CoordinatorTarget::Class(5)),
    );
    assert!(matches!(
        result,
        Err(DomainError::TargetAlreadyCoordinated { .. })
    ));
}

#[test]
fn test_removal_requires_assignment() {
    assert_eq!(
        validate_removal(4, None),
        Err(DomainError::NotACoordinator { faculty: 4 })
    );
    assert_eq!(
        validate_removal(4, Some(CoordinatorTarget::Class(2))),
        Ok(CoordinatorTarget::Class(2))
    );
}

#[test]
fn test_links_consistent_when_both_sides_agree() {
    let faculty: Vec<Faculty> = vec![
        create_test_faculty(1, Some(CoordinatorTarget::Division(10))),
        create_test_faculty(2, None),
    ];
    let divisions: Vec<Division> = vec![
        create_test_division(10, Some(1)),
        create_test_division(11, None),
    ];
    assert!(coordinator_links_consistent(&faculty, &[], &divisions));
}

#[test]
fn test_links_inconsistent_when_one_side_dangles() {
    let faculty: Vec<Faculty> = vec![create_test_faculty(
        1,
        Some(CoordinatorTarget::Division(10)),
    )];
    let divisions: Vec<Division> = vec![create_test_division(10, None)];
    assert!(!coordinator_links_consistent(&faculty, &[], &divisions));

    let faculty: Vec<Faculty> = vec![create_test_faculty(1, None)];
    let mut class: Class = Class::new(
        String::from("CLS_SEC_2025-26"),
        String::from("Second Year"),
        String::from("2025-26"),
    );
    class.id = Some(3);
    class.class_coordinator = Some(1);
    assert!(!coordinator_links_consistent(&faculty, &[class], &[]));
}
