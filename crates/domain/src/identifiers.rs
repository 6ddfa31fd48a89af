// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derivation of human-readable identifiers.
//!
//! Every function here is pure: the same inputs always produce the same
//! identifier, and nothing is looked up. Collisions are resolved separately
//! by the uniqueness checker.
//!
//! When a required input is empty the generator returns an empty string.
//! Callers treat that as "not ready" and use [`require_identifier`] before
//! submitting.

use crate::error::DomainError;

/// Removes all whitespace from a value.
fn compact(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Returns at most the first `count` characters of a value.
fn prefix(value: &str, count: usize) -> String {
    value.chars().take(count).collect()
}

/// Returns `true` if any of the inputs is empty after trimming.
fn any_blank(inputs: &[&str]) -> bool {
    inputs.iter().any(|input| input.trim().is_empty())
}

/// Collapses a free-form name into an upper-case identifier.
///
/// Runs of characters outside `[a-z0-9]` (after lower-casing) become a
/// single `_`, leading and trailing `_` are removed, and the result is
/// upper-cased: `"Computer Science & Eng."` becomes `COMPUTER_SCIENCE_ENG`.
#[must_use]
pub fn normalize_identifier(name: &str) -> String {
    let lowered: String = name.to_lowercase();
    let mut out: String = String::with_capacity(lowered.len());
    let mut pending_separator: bool = false;

    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }

    out.to_uppercase()
}

/// Derives a department code from the department name.
#[must_use]
pub fn department_code(name: &str) -> String {
    normalize_identifier(name)
}

/// Derives a name-based employee identifier for a department head or
/// faculty member.
#[must_use]
pub fn employee_id(name: &str) -> String {
    normalize_identifier(name)
}

/// Derives a `FAC_<initials><email prefix>_<year>` faculty identifier.
///
/// Initials are the first alphanumeric character of every word in the
/// name; the email prefix is the first three characters of the local part.
#[must_use]
pub fn faculty_initials_id(name: &str, email: &str, current_year: i32) -> String {
    if any_blank(&[name, email]) {
        return String::new();
    }

    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(char::is_ascii_alphanumeric))
        .collect();
    let local_part: &str = email.trim().split('@').next().unwrap_or_default();
    let email_prefix: String = prefix(local_part, 3);

    if initials.is_empty() || email_prefix.is_empty() {
        return String::new();
    }

    format!("FAC_{initials}{email_prefix}_{current_year}").to_uppercase()
}

/// Derives a `CLS_<name prefix>_<year>` class identifier.
///
/// `("Second Year", "2025-26")` becomes `CLS_SEC_2025-26`.
#[must_use]
pub fn class_id(name: &str, year: &str) -> String {
    if any_blank(&[name, year]) {
        return String::new();
    }

    let name_prefix: String = prefix(&compact(name), 3);
    format!("CLS_{name_prefix}_{}", year.trim()).to_uppercase()
}

/// Derives a `DIV_<class prefix><division name>_<year>` division identifier.
#[must_use]
pub fn division_id(class_name: &str, division_name: &str, current_year: i32) -> String {
    if any_blank(&[class_name, division_name]) {
        return String::new();
    }

    let class_prefix: String = prefix(&compact(class_name), 3);
    let division: String = compact(division_name);
    format!("DIV_{class_prefix}{division}_{current_year}").to_uppercase()
}

/// Derives a `LAB_<class prefix><division initial>_<lab prefix>_<year>` lab
/// identifier.
///
/// The division initial is omitted for labs scoped directly to a class.
#[must_use]
pub fn lab_id(
    class_name: &str,
    division_name: Option<&str>,
    lab_name: &str,
    current_year: i32,
) -> String {
    if any_blank(&[class_name, lab_name]) {
        return String::new();
    }
    if division_name.is_some_and(|d| d.trim().is_empty()) {
        return String::new();
    }

    let class_prefix: String = prefix(&compact(class_name), 3);
    let division_prefix: String = division_name
        .map(|d| prefix(&compact(d), 1))
        .unwrap_or_default();
    let lab_prefix: String = prefix(&compact(lab_name), 2);

    format!("LAB_{class_prefix}{division_prefix}_{lab_prefix}_{current_year}").to_uppercase()
}

/// Derives a `SUB_<code>_<name prefix>` subject identifier.
#[must_use]
pub fn subject_id(code: &str, name: &str) -> String {
    if any_blank(&[code, name]) {
        return String::new();
    }

    let name_prefix: String = prefix(&compact(name), 3);
    format!("SUB_{}_{name_prefix}", compact(code)).to_uppercase()
}

/// Rejects an empty candidate produced by one of the generators.
///
/// # Errors
///
/// Returns `DomainError::EmptyInput` naming `field` if `candidate` is empty.
pub fn require_identifier(field: &'static str, candidate: String) -> Result<String, DomainError> {
    if candidate.is_empty() {
        return Err(DomainError::EmptyInput { field });
    }
    Ok(candidate)
}
