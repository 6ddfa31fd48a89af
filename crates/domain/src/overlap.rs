// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Lab, LabScope, RollRange};

/// Returns `true` if two inclusive ranges share at least one roll number.
///
/// Touching ranges overlap: `[1, 5]` and `[5, 10]` share roll number 5.
#[must_use]
pub const fn ranges_overlap(a: &RollRange, b: &RollRange) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

/// Finds the first lab in `scope` whose range intersects `candidate`.
///
/// Labs outside `scope` are ignored, as is the lab with storage key
/// `exclude` (the lab being edited).
#[must_use]
pub fn find_overlap<'a>(
    candidate: &RollRange,
    scope: LabScope,
    labs: &'a [Lab],
    exclude: Option<i64>,
) -> Option<&'a Lab> {
    labs.iter()
        .filter(|lab| lab.scope == scope)
        .filter(|lab| exclude.is_none() || lab.id != exclude)
        .find(|lab| ranges_overlap(candidate, &lab.range))
}

/// Validates a proposed lab range against the labs already in its scope.
///
/// # Errors
///
/// Returns `DomainError::InvalidRange` if `start > end`, or
/// `DomainError::RangeOverlap` naming the first conflicting lab.
pub fn validate_lab_range(
    start: u32,
    end: u32,
    scope: LabScope,
    labs: &[Lab],
    exclude: Option<i64>,
) -> Result<RollRange, DomainError> {
    let candidate: RollRange = RollRange::new(start, end)?;

    if let Some(conflict) = find_overlap(&candidate, scope, labs, exclude) {
        return Err(DomainError::RangeOverlap {
            lab_id: conflict.lab_id.clone(),
            lab_name: conflict.name.clone(),
            start: conflict.range.start(),
            end: conflict.range.end(),
        });
    }

    Ok(candidate)
}

/// Suggests the first roll number of a new lab in `scope`.
///
/// This is one past the highest end in scope, or `1` for an empty scope.
#[must_use]
pub fn next_available_start(scope: LabScope, labs: &[Lab]) -> u32 {
    labs.iter()
        .filter(|lab| lab.scope == scope)
        .map(|lab| lab.range.end())
        .max()
        .map_or(1, |end| end.saturating_add(1))
}
