//! The per-trial context handed to test bodies, and the statistics a run
//! accumulates from it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::distribution::Distribution;
use crate::error::{Interrupt, TrialResult};

/// Mutable context for a single trial.
///
/// A fresh `Case` is created for every trial. Once the body returns, the
/// runner folds its tags and collected values into the run's [`Stats`]
/// unless the trial turned out invalid.
#[derive(Debug, Clone, Default)]
pub struct Case {
    tags: BTreeSet<String>,
    collected: Vec<(String, usize)>,
    notes: Vec<String>,
}

impl Case {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the trial unless `condition` holds.
    ///
    /// ```
    /// use quickprop_core::*;
    ///
    /// let case = Case::new();
    /// assert!(case.assert(1 + 1 == 2).is_ok());
    /// assert!(matches!(case.assert(false), Err(Interrupt::AssertionFailed)));
    /// ```
    pub fn assert(&self, condition: bool) -> TrialResult {
        if condition {
            Ok(())
        } else {
            Err(Interrupt::AssertionFailed)
        }
    }

    /// Discard the trial unless `condition` holds.
    pub fn guard(&self, condition: bool) -> TrialResult {
        if condition {
            Ok(())
        } else {
            Err(Interrupt::CaseInvalid)
        }
    }

    /// Fail the trial unless `result` is an error.
    pub fn assert_err<T, E>(&self, result: &Result<T, E>) -> TrialResult {
        self.assert(result.is_err())
    }

    /// Tag this trial when `condition` holds.
    pub fn classify(&mut self, condition: bool, tag: impl Into<String>) {
        if condition {
            self.tags.insert(tag.into());
        }
    }

    /// Count one occurrence of `value` in the run's histogram.
    pub fn collect(&mut self, value: impl fmt::Display) {
        let label = value.to_string();
        match self.collected.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, count)) => *count += 1,
            None => self.collected.push((label, 1)),
        }
    }

    /// Record an extra value to show alongside the arguments if this trial
    /// fails.
    pub fn note_arg(&mut self, value: impl fmt::Debug) {
        self.notes.push(format!("{value:?}"));
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn collected(&self) -> &[(String, usize)] {
        &self.collected
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub(crate) fn into_report(self) -> (Vec<String>, Vec<String>) {
        (self.notes, self.tags.into_iter().collect())
    }
}

/// Statistics gathered while running one property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Trials whose body returned normally.
    pub pass: usize,
    /// Trials discarded by a guard.
    pub invalid: usize,
    /// How many folded trials carried each tag.
    pub tags: BTreeMap<String, usize>,
    collected: Vec<(String, usize)>,
    observed: usize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished trial's tags and collected values into the totals.
    pub fn absorb(&mut self, case: &Case) {
        self.observed += 1;
        for tag in &case.tags {
            self.record_tag(tag);
        }
        for (label, count) in &case.collected {
            self.record_collection(label, *count);
        }
    }

    pub fn record_tag(&mut self, tag: &str) {
        *self.tags.entry(tag.to_string()).or_insert(0) += 1;
    }

    pub fn record_collection(&mut self, label: &str, count: usize) {
        match self.collected.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, total)) => *total += count,
            None => self.collected.push((label.to_string(), count)),
        }
    }

    /// How often `tag` was recorded.
    pub fn tag_count(&self, tag: &str) -> usize {
        self.tags.get(tag).copied().unwrap_or(0)
    }

    /// Number of trials folded into these statistics.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Raw collected counts in first-seen order.
    pub fn collected(&self) -> &[(String, usize)] {
        &self.collected
    }

    /// Histogram of everything collected, or `None` if nothing was.
    pub fn distribution(&self) -> Option<Distribution<String>> {
        Distribution::from_weighted(
            self.collected
                .iter()
                .map(|(label, count)| (*count as f64, label.clone())),
        )
        .ok()
    }
}
