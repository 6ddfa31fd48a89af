// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use reflektion_domain::FacultyIdScheme;
use reflektion_persistence::Persistence;

use crate::{
    AuthenticatedActor, CreateClassRequest, CreateDivisionRequest, CreateFacultyRequest,
    CreateResponse, Role, create_class, create_division, create_faculty,
};

pub fn create_test_developer() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("dev-1"), Role::Developer)
}

pub fn create_test_super_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::SuperAdmin)
}

pub fn create_test_department_head() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("head-1"), Role::DepartmentHead)
}

pub fn create_test_faculty_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("faculty-1"), Role::Faculty)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates the class "Second Year" for 2025-26 and returns its key.
pub fn seed_class(persistence: &mut Persistence) -> i64 {
    let request: CreateClassRequest = CreateClassRequest {
        name: String::from("Second Year"),
        year: String::from("2025-26"),
    };
    let response: CreateResponse =
        create_class(persistence, &request, &create_test_department_head()).unwrap();
    response.id
}

/// Creates a division of `class` and returns its key.
pub fn seed_division(persistence: &mut Persistence, class: i64, name: &str) -> i64 {
    let request: CreateDivisionRequest = CreateDivisionRequest {
        class,
        name: name.to_string(),
    };
    let response: CreateResponse =
        create_division(persistence, &request, &create_test_department_head()).unwrap();
    response.id
}

/// Creates a name-based faculty member and returns its key.
pub fn seed_faculty(persistence: &mut Persistence, name: &str, email: &str) -> i64 {
    let request: CreateFacultyRequest = CreateFacultyRequest {
        name: name.to_string(),
        email: email.to_string(),
        scheme: FacultyIdScheme::NameBased,
    };
    let response: CreateResponse =
        create_faculty(persistence, &request, &create_test_department_head()).unwrap();
    response.id
}
