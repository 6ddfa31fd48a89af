// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, Mutation, Record, State, TransitionResult, apply};
use reflektion_domain::{LabScope, coordinator_links_consistent};

pub const TEST_YEAR: i32 = 2026;

/// Applies a command and assigns storage keys to inserted records the way
/// persistence would, returning the resulting state.
pub fn apply_and_persist(state: &State, command: Command) -> State {
    let result: TransitionResult = apply(state, command, TEST_YEAR).unwrap();
    assign_ids(result.new_state)
}

/// Replaces every `id: None` with the next free key of its collection.
pub fn assign_ids(mut state: State) -> State {
    macro_rules! fill {
        ($field:ident) => {{
            let mut next: i64 = state.$field.iter().filter_map(|r| r.id).max().unwrap_or(0);
            for record in &mut state.$field {
                if record.id.is_none() {
                    next += 1;
                    record.id = Some(next);
                }
            }
        }};
    }
    fill!(departments);
    fill!(department_heads);
    fill!(faculty);
    fill!(classes);
    fill!(divisions);
    fill!(labs);
    fill!(subjects);

    // Owning classes list their divisions by key.
    let divisions: Vec<(i64, i64)> = state
        .divisions
        .iter()
        .filter_map(|d| d.id.map(|id| (id, d.owner_class)))
        .collect();
    for class in &mut state.classes {
        class.divisions = divisions
            .iter()
            .filter(|(_, owner)| Some(*owner) == class.id)
            .map(|(id, _)| *id)
            .collect();
    }
    state
}

/// A state with one class "SE" (key 1) holding two divisions A (key 1) and
/// B (key 2), plus two faculty members (keys 1 and 2).
pub fn create_test_state() -> State {
    let mut state: State = State::new();
    state = apply_and_persist(
        &state,
        Command::CreateClass {
            name: String::from("SE"),
            year: String::from("2025-26"),
        },
    );
    for name in ["A", "B"] {
        state = apply_and_persist(
            &state,
            Command::CreateDivision {
                class: 1,
                name: String::from(name),
            },
        );
    }
    for (name, email) in [
        ("Jane Doe", "jane@college.edu"),
        ("John Roe", "john@college.edu"),
    ] {
        state = apply_and_persist(
            &state,
            Command::CreateFaculty {
                name: String::from(name),
                email: String::from(email),
                scheme: reflektion_domain::FacultyIdScheme::NameBased,
            },
        );
    }
    state
}

pub fn create_lab_command(scope: LabScope, name: &str, start: u32, end: u32) -> Command {
    Command::CreateLab {
        scope,
        name: String::from(name),
        start,
        end,
    }
}

pub fn assert_links_consistent(state: &State) {
    assert!(coordinator_links_consistent(
        &state.faculty,
        &state.classes,
        &state.divisions
    ));
}

pub fn deleted_keys(result: &TransitionResult, kind: reflektion_domain::EntityKind) -> Vec<i64> {
    result
        .mutations
        .iter()
        .filter_map(|m| match m {
            Mutation::Delete { kind: k, id } if *k == kind => Some(*id),
            _ => None,
        })
        .collect()
}

pub fn updated_records(result: &TransitionResult) -> Vec<&Record> {
    result
        .mutations
        .iter()
        .filter_map(|m| match m {
            Mutation::Update(record) => Some(record),
            _ => None,
        })
        .collect()
}
