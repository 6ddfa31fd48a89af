// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use reflektion::{Command, State};
use reflektion_domain::{CoordinatorTarget, FacultyIdScheme, LabScope, coordinator_links_consistent};

use super::{create_lab, create_test_persistence, execute};

#[test]
fn test_load_state_reflects_created_records() {
    let mut persistence: Persistence = create_test_persistence();

    let state: State = persistence.load_state().unwrap();

    assert_eq!(state.classes.len(), 1);
    assert_eq!(state.classes[0].id, Some(1));
    assert_eq!(state.classes[0].class_id, "CLS_SE_2025-26");
    assert_eq!(state.classes[0].divisions, vec![1, 2]);
    assert_eq!(state.divisions[1].division_id, "DIV_SEB_2026");
    assert_eq!(state.divisions[1].owner_class, 1);
    assert_eq!(state.faculty[0].faculty_id, "JANE_DOE");
    assert_eq!(state.faculty[1].email, "john@college.edu");
}

#[test]
fn test_lab_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = create_lab(&mut persistence, LabScope::Division(2), "Batch A", 1, 30);

    let labs = persistence.list_labs(Some(LabScope::Division(2))).unwrap();

    assert_eq!(labs.len(), 1);
    assert_eq!(labs[0].id, Some(id));
    assert_eq!(labs[0].lab_id, "LAB_SEB_BA_2026");
    assert_eq!(labs[0].scope, LabScope::Division(2));
    assert_eq!(labs[0].range.start(), 1);
    assert_eq!(labs[0].range.end(), 30);
    assert!(persistence.list_labs(Some(LabScope::Division(1))).unwrap().is_empty());
}

#[test]
fn test_derived_identifiers_disambiguate_against_stored_rows() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for n in 0..3 {
        execute(
            &mut persistence,
            Command::CreateFaculty {
                name: String::from("Jane Elizabeth Smith"),
                email: format!("jes{n}@college.edu"),
                scheme: FacultyIdScheme::NameBased,
            },
        );
    }

    let ids: Vec<String> = persistence
        .list_faculty()
        .unwrap()
        .into_iter()
        .map(|f| f.faculty_id)
        .collect();
    assert_eq!(
        ids,
        vec!["JANE_ELIZABETH_SMITH", "JANE_ELIZABE_01", "JANE_ELIZABE_02"]
    );
}

#[test]
fn test_coordinator_link_persists_on_both_sides() {
    let mut persistence: Persistence = create_test_persistence();
    execute(
        &mut persistence,
        Command::AssignCoordinator {
            faculty: 2,
            target: CoordinatorTarget::Division(1),
        },
    );

    let state: State = persistence.load_state().unwrap();

    assert_eq!(state.division(1).unwrap().class_coordinator, Some(2));
    assert_eq!(
        state.faculty_member(2).unwrap().coordinator_for,
        Some(CoordinatorTarget::Division(1))
    );
    assert!(coordinator_links_consistent(
        &state.faculty,
        &state.classes,
        &state.divisions
    ));
}

#[test]
fn test_faculty_class_assignments_persist() {
    let mut persistence: Persistence = create_test_persistence();
    execute(
        &mut persistence,
        Command::AssignFacultyClass {
            faculty: 1,
            class: 1,
        },
    );

    let faculty = persistence.list_faculty().unwrap();
    assert!(faculty[0].assigned_classes.contains(&1));
    assert!(faculty[1].assigned_classes.is_empty());
}

#[test]
fn test_updates_do_not_rewrite_identifiers() {
    let mut persistence: Persistence = create_test_persistence();
    execute(
        &mut persistence,
        Command::UpdateClass {
            class: 1,
            name: String::from("Third Year"),
            year: String::from("2026-27"),
        },
    );

    let class = &persistence.list_classes().unwrap()[0];
    assert_eq!(class.name, "Third Year");
    assert_eq!(class.year, "2026-27");
    assert_eq!(class.class_id, "CLS_SE_2025-26");
}
