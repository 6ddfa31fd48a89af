// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reflektion_domain::{FacultyIdScheme, LabScope};
use reflektion_persistence::Persistence;

use crate::{
    ApiError, CreateDepartmentRequest, CreateLabRequest, CreateResponse, PreviewRequest,
    PreviewResponse, create_department, create_lab, current_year, preview_identifier,
};

use super::helpers::{
    create_test_department_head, create_test_persistence, create_test_super_admin, seed_class,
    seed_division, seed_faculty,
};

#[test]
fn test_preview_department_code_on_empty_state() {
    let mut persistence: Persistence = create_test_persistence();

    let response: PreviewResponse = preview_identifier(
        &mut persistence,
        &PreviewRequest::Department {
            name: String::from("Mechanical Engineering"),
        },
    )
    .unwrap();

    assert!(response.is_unique);
    assert_eq!(response.resolved_id, "MECHANICAL_ENGINEERING");
    assert_eq!(response.next_available_start, None);
}

#[test]
fn test_preview_matches_the_identifier_later_stored() {
    let mut persistence: Persistence = create_test_persistence();
    let request: CreateDepartmentRequest = CreateDepartmentRequest {
        name: String::from("Physics"),
    };
    create_department(&mut persistence, &request, &create_test_super_admin()).unwrap();

    let preview: PreviewResponse = preview_identifier(
        &mut persistence,
        &PreviewRequest::Department {
            name: String::from("Physics"),
        },
    )
    .unwrap();
    assert_eq!(preview.resolved_id, "PHYSICS_1");

    let created: CreateResponse =
        create_department(&mut persistence, &request, &create_test_super_admin()).unwrap();
    assert_eq!(created.identifier, preview.resolved_id);
}

#[test]
fn test_preview_faculty_uses_padded_suffix() {
    let mut persistence: Persistence = create_test_persistence();
    seed_faculty(&mut persistence, "Jane Elizabeth Doe", "jane@example.edu");

    let response: PreviewResponse = preview_identifier(
        &mut persistence,
        &PreviewRequest::Faculty {
            name: String::from("Jane Elizabeth Doe"),
            email: String::new(),
            scheme: FacultyIdScheme::NameBased,
        },
    )
    .unwrap();

    assert_eq!(response.resolved_id, "JANE_ELIZABE_01");
}

#[test]
fn test_preview_lab_suggests_next_start() {
    let mut persistence: Persistence = create_test_persistence();
    let class: i64 = seed_class(&mut persistence);
    let division: i64 = seed_division(&mut persistence, class, "A");
    let scope: LabScope = LabScope::Division(division);
    create_lab(
        &mut persistence,
        &CreateLabRequest {
            scope,
            name: String::from("Batch 1"),
            start: 1,
            end: 30,
        },
        &create_test_department_head(),
    )
    .unwrap();

    let response: PreviewResponse = preview_identifier(
        &mut persistence,
        &PreviewRequest::Lab {
            scope,
            name: String::from("Batch 2"),
        },
    )
    .unwrap();

    assert_eq!(
        response.resolved_id,
        format!("LAB_SECA_BA_{}_1", current_year())
    );
    assert_eq!(response.next_available_start, Some(31));
}

#[test]
fn test_preview_lab_in_empty_scope_starts_at_one() {
    let mut persistence: Persistence = create_test_persistence();
    let class: i64 = seed_class(&mut persistence);

    let response: PreviewResponse = preview_identifier(
        &mut persistence,
        &PreviewRequest::Lab {
            scope: LabScope::Class(class),
            name: String::from("Batch 1"),
        },
    )
    .unwrap();

    assert_eq!(response.next_available_start, Some(1));
}

#[test]
fn test_preview_with_empty_input_is_invalid() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<PreviewResponse, ApiError> = preview_identifier(
        &mut persistence,
        &PreviewRequest::Subject {
            code: String::from("  "),
            name: String::from("Data Structures"),
        },
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "code"
    ));
}

#[test]
fn test_preview_division_of_missing_class_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<PreviewResponse, ApiError> = preview_identifier(
        &mut persistence,
        &PreviewRequest::Division {
            class: 7,
            name: String::from("A"),
        },
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_preview_request_deserializes_from_tagged_json() {
    let request: PreviewRequest = serde_json::from_str(
        r#"{"kind":"class","name":"Second Year","year":"2025-26"}"#,
    )
    .unwrap();

    assert_eq!(
        request,
        PreviewRequest::Class {
            name: String::from("Second Year"),
            year: String::from("2025-26"),
        }
    );
}
