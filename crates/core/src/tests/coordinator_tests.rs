// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TEST_YEAR, apply_and_persist, assert_links_consistent, create_test_state, updated_records,
};
use crate::{Command, CoreError, Record, State, TransitionResult, apply};
use reflektion_domain::{CoordinatorTarget, DomainError};

fn assign(faculty: i64, target: CoordinatorTarget) -> Command {
    Command::AssignCoordinator { faculty, target }
}

#[test]
fn test_assign_coordinator_writes_both_sides() {
    let state: State = create_test_state();

    let result: TransitionResult =
        apply(&state, assign(1, CoordinatorTarget::Class(1)), TEST_YEAR).unwrap();

    assert_eq!(result.new_state.class(1).unwrap().class_coordinator, Some(1));
    assert_eq!(
        result.new_state.faculty_member(1).unwrap().coordinator_for,
        Some(CoordinatorTarget::Class(1))
    );
    assert!(result.new_state.faculty_member(1).unwrap().is_class_coordinator());

    let updates: Vec<&Record> = updated_records(&result);
    assert_eq!(updates.len(), 2);
    assert!(matches!(updates[0], Record::Class(_)));
    assert!(matches!(updates[1], Record::Faculty(_)));
    assert_links_consistent(&result.new_state);
}

#[test]
fn test_second_coordinator_for_target_rejected() {
    let state: State = apply_and_persist(
        &create_test_state(),
        assign(1, CoordinatorTarget::Division(1)),
    );

    let result: Result<TransitionResult, CoreError> =
        apply(&state, assign(2, CoordinatorTarget::Division(1)), TEST_YEAR);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::TargetAlreadyCoordinated {
            target: CoordinatorTarget::Division(1),
            coordinator: 1,
        })
    );
}

#[test]
fn test_faculty_cannot_coordinate_two_targets() {
    let state: State = apply_and_persist(
        &create_test_state(),
        assign(1, CoordinatorTarget::Division(1)),
    );

    let result: Result<TransitionResult, CoreError> =
        apply(&state, assign(1, CoordinatorTarget::Division(2)), TEST_YEAR);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::FacultyAlreadyCoordinating {
            faculty: 1,
            current: CoordinatorTarget::Division(1),
        })
    );
}

#[test]
fn test_reassigning_same_target_reports_target_first() {
    let state: State = apply_and_persist(
        &create_test_state(),
        assign(1, CoordinatorTarget::Class(1)),
    );

    let result: Result<TransitionResult, CoreError> =
        apply(&state, assign(1, CoordinatorTarget::Class(1)), TEST_YEAR);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::TargetAlreadyCoordinated { .. }
        ))
    ));
}

#[test]
fn test_remove_coordinator_clears_both_sides() {
    let state: State = apply_and_persist(
        &create_test_state(),
        assign(2, CoordinatorTarget::Division(2)),
    );

    let result: TransitionResult = apply(
        &state,
        Command::RemoveCoordinator { faculty: 2 },
        TEST_YEAR,
    )
    .unwrap();

    assert_eq!(result.new_state.division(2).unwrap().class_coordinator, None);
    assert_eq!(result.new_state.faculty_member(2).unwrap().coordinator_for, None);
    assert_links_consistent(&result.new_state);
}

#[test]
fn test_remove_coordinator_without_assignment() {
    let state: State = create_test_state();

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::RemoveCoordinator { faculty: 1 },
        TEST_YEAR,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::NotACoordinator { faculty: 1 })
    );
}

#[test]
fn test_assign_to_missing_target() {
    let state: State = create_test_state();

    let result: Result<TransitionResult, CoreError> =
        apply(&state, assign(1, CoordinatorTarget::Division(9)), TEST_YEAR);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotFound { id: 9, .. }))
    ));
}

#[test]
fn test_links_stay_consistent_across_sequence() {
    let mut state: State = create_test_state();
    let commands: Vec<Command> = vec![
        assign(1, CoordinatorTarget::Division(1)),
        assign(2, CoordinatorTarget::Division(2)),
        Command::RemoveCoordinator { faculty: 1 },
        assign(1, CoordinatorTarget::Class(1)),
        Command::RemoveCoordinator { faculty: 2 },
        assign(2, CoordinatorTarget::Division(1)),
        Command::DeleteDivision { division: 1 },
        assign(2, CoordinatorTarget::Division(2)),
        Command::DeleteFaculty { faculty: 1 },
    ];

    for command in commands {
        state = apply_and_persist(&state, command);
        assert_links_consistent(&state);
    }

    assert_eq!(state.class(1).unwrap().class_coordinator, None);
    assert_eq!(state.division(2).unwrap().class_coordinator, Some(2));
}
