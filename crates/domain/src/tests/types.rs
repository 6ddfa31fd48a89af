// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CoordinatorTarget, DepartmentHead, DomainError, EntityKind, Faculty, LabScope, RollRange,
};

#[test]
fn test_roll_range_accepts_single_roll_number() {
    let range: RollRange = RollRange::new(7, 7).unwrap();
    assert_eq!(range.start(), 7);
    assert_eq!(range.end(), 7);
    assert_eq!(range.to_string(), "7-7");
}

#[test]
fn test_roll_range_rejects_inverted_bounds() {
    let result: Result<RollRange, DomainError> = RollRange::new(31, 30);
    assert_eq!(result, Err(DomainError::InvalidRange { start: 31, end: 30 }));
}

#[test]
fn test_entity_kind_round_trips_through_str() {
    for kind in [
        EntityKind::Department,
        EntityKind::DepartmentHead,
        EntityKind::Faculty,
        EntityKind::Class,
        EntityKind::Division,
        EntityKind::Lab,
        EntityKind::Subject,
    ] {
        assert_eq!(kind.as_str().parse::<EntityKind>(), Ok(kind));
    }
    assert!("students".parse::<EntityKind>().is_err());
}

#[test]
fn test_coordinator_target_accessors() {
    let target: CoordinatorTarget = CoordinatorTarget::Division(12);
    assert_eq!(target.target_id(), 12);
    assert_eq!(target.kind(), EntityKind::Division);
    assert_eq!(target.to_string(), "division 12");
}

#[test]
fn test_coordinator_target_serializes_as_tagged_variant() {
    let target: CoordinatorTarget = CoordinatorTarget::Class(3);
    let json: String = serde_json::to_string(&target).unwrap();
    assert_eq!(json, r#"{"type":"class","target_id":3}"#);

    let scope: LabScope = LabScope::Division(9);
    let json: String = serde_json::to_string(&scope).unwrap();
    assert_eq!(json, r#"{"type":"division","target_id":9}"#);
}

#[test]
fn test_new_people_normalize_email() {
    let head: DepartmentHead = DepartmentHead::new(
        String::from("Asha Rao"),
        "  Asha.Rao@College.EDU ",
        String::from("ASHA_RAO"),
        None,
    );
    assert_eq!(head.email, "asha.rao@college.edu");
    assert!(head.management_enabled);

    let faculty: Faculty = Faculty::new(
        String::from("Vikram Shah"),
        "VShah@College.edu",
        String::from("VIKRAM_SHAH"),
    );
    assert_eq!(faculty.email, "vshah@college.edu");
    assert!(!faculty.is_class_coordinator());
    assert!(faculty.assigned_classes.is_empty());
}
