// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum length of the base kept by [`SuffixScheme::Padded`].
pub const PADDED_BASE_MAX_LEN: usize = 12;

/// How a colliding candidate is disambiguated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixScheme {
    /// Appends `_1`, `_2`, … to the full candidate.
    #[default]
    Numeric,
    /// Truncates the candidate to [`PADDED_BASE_MAX_LEN`] characters and
    /// appends a zero-padded counter: `_01`, `_02`, …
    ///
    /// Used for identifiers derived from person names.
    Padded,
}

impl SuffixScheme {
    fn variant(self, candidate: &str, counter: u64) -> String {
        match self {
            Self::Numeric => format!("{candidate}_{counter}"),
            Self::Padded => {
                let base: String = candidate.chars().take(PADDED_BASE_MAX_LEN).collect();
                let base: &str = base.trim_end_matches('_');
                format!("{base}_{counter:02}")
            }
        }
    }
}

/// Outcome of a uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniquenessCheck {
    /// Whether `resolved_id` is free. Only `false` for an empty candidate.
    pub is_unique: bool,
    /// The candidate, or its first free disambiguated variant.
    pub resolved_id: String,
    /// Whether the original candidate was already taken.
    pub disambiguated: bool,
}

/// Returns `true` if `candidate` does not occur in `existing`.
#[must_use]
pub fn is_identifier_free<'a, I>(candidate: &str, existing: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    !existing.into_iter().any(|id| id == candidate)
}

/// Resolves `candidate` against the identifiers already in use.
///
/// If the candidate is free it is returned unchanged. Otherwise suffixed
/// variants are tried with a strictly increasing counter until one is
/// free; since `existing` is finite the loop always terminates.
///
/// The result is advisory: a concurrent writer may claim the identifier
/// before it is stored, and the store's own unique constraint decides.
#[must_use]
pub fn resolve_unique<'a, I>(candidate: &str, existing: I, scheme: SuffixScheme) -> UniquenessCheck
where
    I: IntoIterator<Item = &'a str>,
{
    if candidate.is_empty() {
        return UniquenessCheck {
            is_unique: false,
            resolved_id: String::new(),
            disambiguated: false,
        };
    }

    let taken: HashSet<&str> = existing.into_iter().collect();
    if !taken.contains(candidate) {
        return UniquenessCheck {
            is_unique: true,
            resolved_id: candidate.to_string(),
            disambiguated: false,
        };
    }

    let mut counter: u64 = 1;
    loop {
        let variant: String = scheme.variant(candidate, counter);
        if !taken.contains(variant.as_str()) {
            return UniquenessCheck {
                is_unique: true,
                resolved_id: variant,
                disambiguated: true,
            };
        }
        counter += 1;
    }
}
