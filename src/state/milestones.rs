//! Developmental milestone checklist.
//!
//! DESIGN
//! ======
//! Completion flags are keyed by (month, milestone text). The set of fully
//! completed months is derived: every toggle recomputes the toggled month's
//! membership against the whole reference list for that month, so the set
//! can never hold a partially checked month.
//!
//! Only milestones present in the reference list can be toggled. Anything
//! else is rejected and leaves the store untouched.

#[cfg(test)]
#[path = "milestones_test.rs"]
mod milestones_test;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::catalog::toys::{ToyCatalog, ToyRecord};

/// Returned by [`MilestoneStore::latest_completed_month`] when no month is complete.
pub const NO_COMPLETED_MONTH: i64 = -1;

/// Most toys suggested for a month.
pub const SUGGESTION_LIMIT: usize = 4;

const DEFAULT_MILESTONES: [(u32, [&str; 2]); 4] = [
    (0, ["Lifts head", "Responds to sound"]),
    (1, ["Smiles at people", "Follows objects"]),
    (2, ["Rolls over", "Holds head steady"]),
    (3, ["Sits without support", "Pushes down on legs"]),
];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MilestoneError {
    #[error("no milestones defined for month {0}")]
    UnknownMonth(u32),
    #[error("milestone {milestone:?} is not listed for month {month}")]
    UnknownMilestone { month: u32, milestone: String },
}

#[derive(Debug, Clone)]
pub struct MilestoneStore {
    reference: BTreeMap<u32, Vec<String>>,
    completed: HashMap<(u32, String), bool>,
    completed_months: BTreeSet<u32>,
}

impl Default for MilestoneStore {
    fn default() -> Self {
        let reference = DEFAULT_MILESTONES
            .iter()
            .map(|(month, items)| (*month, items.iter().map(|m| (*m).to_string()).collect()))
            .collect();
        Self::with_reference(reference)
    }
}

impl MilestoneStore {
    /// Store over the default four-month checklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store over a custom checklist. Months with no milestones are dropped.
    #[must_use]
    pub fn with_reference(mut reference: BTreeMap<u32, Vec<String>>) -> Self {
        reference.retain(|_, items| !items.is_empty());
        Self { reference, completed: HashMap::new(), completed_months: BTreeSet::new() }
    }

    /// Months that have a checklist, ascending.
    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.reference.keys().copied()
    }

    /// Checklist for `month`, empty if the month is not tracked.
    #[must_use]
    pub fn milestones_for(&self, month: u32) -> &[String] {
        self.reference.get(&month).map(Vec::as_slice).unwrap_or_default()
    }

    /// Flip one milestone and return its new state.
    ///
    /// # Errors
    ///
    /// Returns an error if `month` or `milestone` is not in the checklist.
    pub fn toggle(&mut self, month: u32, milestone: &str) -> Result<bool, MilestoneError> {
        let items = self.reference.get(&month).ok_or(MilestoneError::UnknownMonth(month))?;
        if !items.iter().any(|m| m == milestone) {
            return Err(MilestoneError::UnknownMilestone { month, milestone: milestone.to_string() });
        }

        let flag = self.completed.entry((month, milestone.to_string())).or_insert(false);
        *flag = !*flag;
        let now = *flag;

        if self.month_complete(month) {
            self.completed_months.insert(month);
        } else {
            self.completed_months.remove(&month);
        }
        Ok(now)
    }

    #[must_use]
    pub fn is_completed(&self, month: u32, milestone: &str) -> bool {
        self.completed
            .get(&(month, milestone.to_string()))
            .copied()
            .unwrap_or(false)
    }

    /// Months whose whole checklist is checked, ascending.
    #[must_use]
    pub fn completed_months(&self) -> &BTreeSet<u32> {
        &self.completed_months
    }

    /// Highest fully completed month, or [`NO_COMPLETED_MONTH`].
    #[must_use]
    pub fn latest_completed_month(&self) -> i64 {
        self.completed_months
            .last()
            .map_or(NO_COMPLETED_MONTH, |m| i64::from(*m))
    }

    /// `(checked, total)` for `month`, `None` if the month is not tracked.
    #[must_use]
    pub fn month_progress(&self, month: u32) -> Option<(usize, usize)> {
        let items = self.reference.get(&month)?;
        let done = items.iter().filter(|m| self.is_completed(month, m)).count();
        Some((done, items.len()))
    }

    /// Up to [`SUGGESTION_LIMIT`] toys aimed at exactly `month` that support
    /// one of that month's milestones.
    #[must_use]
    pub fn suggested_toys<'a>(&self, month: u32, catalog: &'a ToyCatalog) -> Vec<&'a ToyRecord> {
        let items = self.milestones_for(month);
        catalog
            .toys()
            .iter()
            .filter(|toy| toy.age_months() == Some(month))
            .filter(|toy| toy.milestones.iter().any(|m| items.contains(m)))
            .take(SUGGESTION_LIMIT)
            .collect()
    }

    fn month_complete(&self, month: u32) -> bool {
        let items = self.milestones_for(month);
        !items.is_empty() && items.iter().all(|m| self.is_completed(month, m))
    }
}
