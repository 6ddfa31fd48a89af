// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{DepartmentHead, EntityKind, normalize_email};

/// Validates that a required text field is not blank.
///
/// # Errors
///
/// Returns `DomainError::EmptyInput` naming `field` if `value` is blank.
pub fn validate_required(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyInput { field });
    }
    Ok(())
}

/// Validates the basic shape of an email address.
///
/// This only checks for a non-empty local part and a domain containing a
/// dot; delivery is not verified.
///
/// # Errors
///
/// Returns `DomainError::EmptyInput` for a blank address and
/// `DomainError::InvalidEmail` for a malformed one.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    validate_required("email", email)?;

    let trimmed: &str = email.trim();
    let valid: bool = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(DomainError::InvalidEmail(trimmed.to_string()));
    }
    Ok(())
}

/// Validates that an email address is not already used within a collection.
///
/// Comparison is case-insensitive.
///
/// # Errors
///
/// Returns `DomainError::DuplicateEmail` if the address is taken.
pub fn validate_email_unique<'a, I>(
    kind: EntityKind,
    email: &str,
    existing: I,
) -> Result<(), DomainError>
where
    I: IntoIterator<Item = &'a str>,
{
    let normalized: String = normalize_email(email);
    if existing
        .into_iter()
        .any(|other| normalize_email(other) == normalized)
    {
        return Err(DomainError::DuplicateEmail {
            kind,
            email: normalized,
        });
    }
    Ok(())
}

/// Validates that subject credits are positive.
///
/// # Errors
///
/// Returns `DomainError::InvalidCredits` for zero credits.
pub const fn validate_credits(credits: u8) -> Result<(), DomainError> {
    if credits == 0 {
        return Err(DomainError::InvalidCredits(credits));
    }
    Ok(())
}

/// Validates that `department` has no head other than `candidate`.
///
/// # Errors
///
/// Returns `DomainError::DepartmentAlreadyHeaded` if another head is
/// already assigned to the department.
pub fn validate_department_unheaded(
    department: i64,
    candidate: Option<i64>,
    heads: &[DepartmentHead],
) -> Result<(), DomainError> {
    let existing: Option<i64> = heads
        .iter()
        .filter(|head| head.department == Some(department))
        .find_map(|head| head.id.filter(|id| Some(*id) != candidate));

    if let Some(head) = existing {
        return Err(DomainError::DepartmentAlreadyHeaded { department, head });
    }
    Ok(())
}
