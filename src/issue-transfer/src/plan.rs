//! Transfer planning.
//!
//! Issues are matched across repositories by exact title. Source issues
//! whose title already exists at the destination are left out of the plan.

use crate::types::Issue;
use std::collections::HashSet;

/// Ordered list of source issues that are missing at the destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPlan {
    issues: Vec<Issue>,
    skipped: usize,
}

impl TransferPlan {
    /// Returns the planned issues, in source order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Returns the number of planned issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if nothing needs to be transferred.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the number of source issues already present at the destination.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Iterates over the planned issues, in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }
}

impl<'a> IntoIterator for &'a TransferPlan {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

/// Computes which source issues still need to be created at the destination.
///
/// A source issue is planned when no destination issue has exactly the same
/// title. Titles are compared without any normalization.
pub fn plan_transfer(source: &[Issue], destination: &[Issue]) -> TransferPlan {
    let existing: HashSet<&str> = destination
        .iter()
        .map(|issue| issue.title.as_str())
        .collect();

    let issues: Vec<Issue> = source
        .iter()
        .filter(|issue| !existing.contains(issue.title.as_str()))
        .cloned()
        .collect();

    TransferPlan {
        skipped: source.len() - issues.len(),
        issues,
    }
}
