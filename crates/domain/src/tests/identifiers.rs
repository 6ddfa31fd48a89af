// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, class_id, department_code, division_id, employee_id, faculty_initials_id, lab_id,
    normalize_identifier, require_identifier, subject_id,
};

#[test]
fn test_department_code_collapses_punctuation_and_spaces() {
    assert_eq!(
        department_code("Computer Science & Eng."),
        "COMPUTER_SCIENCE_ENG"
    );
    assert_eq!(department_code("  --Mechanical--  "), "MECHANICAL");
    assert_eq!(department_code("cs"), "CS");
}

#[test]
fn test_normalize_identifier_returns_empty_for_symbols_only() {
    assert_eq!(normalize_identifier("!!! ---"), "");
    assert_eq!(normalize_identifier(""), "");
}

#[test]
fn test_employee_id_uses_normalized_name() {
    assert_eq!(employee_id("Dr. Asha  Rao"), "DR_ASHA_RAO");
    assert_eq!(employee_id("o'neil smith"), "O_NEIL_SMITH");
}

#[test]
fn test_faculty_initials_id() {
    assert_eq!(
        faculty_initials_id("Jane Mary Doe", "jdoe@college.edu", 2026),
        "FAC_JMDJDO_2026"
    );
    assert_eq!(
        faculty_initials_id("Li", "li@college.edu", 2025),
        "FAC_LLI_2025"
    );
}

#[test]
fn test_faculty_initials_id_empty_when_input_missing() {
    assert_eq!(faculty_initials_id("", "jdoe@college.edu", 2026), "");
    assert_eq!(faculty_initials_id("Jane Doe", "  ", 2026), "");
    assert_eq!(faculty_initials_id("Jane Doe", "@college.edu", 2026), "");
}

#[test]
fn test_class_id_matches_documented_example() {
    assert_eq!(class_id("Second Year", "2025-26"), "CLS_SEC_2025-26");
    assert_eq!(class_id("fy", "2024"), "CLS_FY_2024");
}

#[test]
fn test_class_id_empty_when_input_missing() {
    assert_eq!(class_id("", "2025-26"), "");
    assert_eq!(class_id("Second Year", ""), "");
}

#[test]
fn test_division_id() {
    assert_eq!(division_id("Second Year", "A", 2026), "DIV_SECA_2026");
    assert_eq!(division_id("Third Year", "Batch 2", 2026), "DIV_THIBATCH2_2026");
    assert_eq!(division_id("Third Year", " ", 2026), "");
}

#[test]
fn test_lab_id_with_and_without_division() {
    assert_eq!(
        lab_id("Second Year", Some("A"), "Batch 1", 2026),
        "LAB_SECA_BA_2026"
    );
    assert_eq!(lab_id("Second Year", None, "Batch 1", 2026), "LAB_SEC_BA_2026");
    assert_eq!(lab_id("Second Year", Some(""), "Batch 1", 2026), "");
    assert_eq!(lab_id("Second Year", None, "", 2026), "");
}

#[test]
fn test_subject_id() {
    assert_eq!(subject_id("cs101", "Data Structures"), "SUB_CS101_DAT");
    assert_eq!(subject_id("MA 2", "Al"), "SUB_MA2_AL");
    assert_eq!(subject_id("", "Data Structures"), "");
}

#[test]
fn test_generators_are_deterministic() {
    for _ in 0..3 {
        assert_eq!(class_id("Final Year", "2026-27"), class_id("Final Year", "2026-27"));
        assert_eq!(
            lab_id("Final Year", Some("B"), "Networks", 2026),
            lab_id("Final Year", Some("B"), "Networks", 2026)
        );
        assert_eq!(
            faculty_initials_id("Ravi Kumar", "ravi@college.edu", 2026),
            faculty_initials_id("Ravi Kumar", "ravi@college.edu", 2026)
        );
    }
}

#[test]
fn test_require_identifier_rejects_empty_candidate() {
    assert_eq!(
        require_identifier("name", String::new()),
        Err(DomainError::EmptyInput { field: "name" })
    );
    assert_eq!(
        require_identifier("name", String::from("CS")),
        Ok(String::from("CS"))
    );
}
