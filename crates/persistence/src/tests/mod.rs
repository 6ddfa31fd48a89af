// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod state_tests;

use crate::Persistence;
use reflektion::{Command, State, TransitionResult, apply};
use reflektion_domain::LabScope;

pub const TEST_YEAR: i32 = 2026;

/// Loads fresh state, applies `command`, and writes the result.
///
/// Returns the keys of inserted records.
pub fn execute(persistence: &mut Persistence, command: Command) -> Vec<i64> {
    let state: State = persistence.load_state().unwrap();
    let result: TransitionResult = apply(&state, command, TEST_YEAR).unwrap();
    persistence.apply_mutations(&result.mutations).unwrap()
}

/// Creates class "SE" (2025-26) with divisions A and B, plus two faculty.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    execute(
        &mut persistence,
        Command::CreateClass {
            name: String::from("SE"),
            year: String::from("2025-26"),
        },
    );
    for name in ["A", "B"] {
        execute(
            &mut persistence,
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
        execute(
            &mut persistence,
            Command::CreateFaculty {
                name: String::from(name),
                email: String::from(email),
                scheme: reflektion_domain::FacultyIdScheme::NameBased,
            },
        );
    }
    persistence
}

pub fn create_lab(persistence: &mut Persistence, scope: LabScope, name: &str, start: u32, end: u32) -> i64 {
    execute(
        persistence,
        Command::CreateLab {
            scope,
            name: String::from(name),
            start,
            end,
        },
    )[0]
}
