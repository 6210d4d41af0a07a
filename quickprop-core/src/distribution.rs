//! Discrete probability distributions over labeled weights.
//!
//! A [`Distribution`] is used in two places: weighted choice between values or
//! generators, and the histogram of values collected during a run.

use rand::{Rng, RngCore};

use crate::error::{QuickpropError, Result};

/// A normalized set of `(probability, label)` entries.
///
/// Entries keep their construction order, which is the order [`pick`]
/// scans them in. Probabilities always sum to 1.0 up to floating point
/// error, and a distribution is never empty.
///
/// [`pick`]: Distribution::pick
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<L> {
    entries: Vec<(f64, L)>,
}

impl<L> Distribution<L> {
    /// Build a distribution keeping every pair as its own entry, even when
    /// two labels compare equal.
    pub fn positional<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, L)>,
    {
        let mut entries = Vec::new();
        for (weight, label) in pairs {
            check_weight(weight)?;
            entries.push((weight, label));
        }
        Self::normalized(entries)
    }

    /// Equal weight for every value, keyed by position.
    pub fn uniform<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
    {
        Self::positional(values.into_iter().map(|value| (1.0, value)))
    }

    fn normalized(mut entries: Vec<(f64, L)>) -> Result<Self> {
        let total: f64 = entries.iter().map(|(weight, _)| weight).sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(QuickpropError::InvalidDistribution { total });
        }
        for (weight, _) in &mut entries {
            *weight /= total;
        }
        Ok(Distribution { entries })
    }

    /// Draw a label according to its probability.
    pub fn pick(&self, rng: &mut dyn RngCore) -> &L {
        let r: f64 = rng.gen();
        let mut cumulative = 0.0;
        for (probability, label) in &self.entries {
            cumulative += probability;
            if r < cumulative {
                return label;
            }
        }
        // Rounding can leave r just past the final boundary.
        let last = &self.entries[self.entries.len() - 1].1;
        self.entries
            .iter()
            .rev()
            .find(|(probability, _)| *probability > 0.0)
            .map_or(last, |(_, label)| label)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for the usual collection API.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &L)> {
        self.entries.iter().map(|(probability, label)| (*probability, label))
    }

    /// Entries from most to least probable, ties in construction order.
    pub fn by_probability(&self) -> Vec<(f64, &L)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.0.total_cmp(&a.0));
        sorted
    }

    /// Sum of all probabilities. 1.0 up to rounding.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(probability, _)| probability).sum()
    }
}

impl<L: PartialEq> Distribution<L> {
    /// Build a distribution from raw weights, merging equal labels by summing
    /// their weights.
    pub fn from_weighted<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, L)>,
    {
        let mut entries: Vec<(f64, L)> = Vec::new();
        for (weight, label) in pairs {
            check_weight(weight)?;
            match entries.iter_mut().find(|(_, existing)| *existing == label) {
                Some((sum, _)) => *sum += weight,
                None => entries.push((weight, label)),
            }
        }
        Self::normalized(entries)
    }

    /// Probability mass of `label`, or 0 when it is absent.
    pub fn probability_of(&self, label: &L) -> f64 {
        self.entries
            .iter()
            .filter(|(_, existing)| existing == label)
            .map(|(probability, _)| probability)
            .sum()
    }

    /// The label with the strictly greatest mass, first one on ties.
    pub fn most_probable(&self) -> Option<&L> {
        let mut best: Option<(f64, &L)> = None;
        for (_, label) in &self.entries {
            let mass = self.probability_of(label);
            if best.map_or(true, |(max, _)| mass > max) {
                best = Some((mass, label));
            }
        }
        best.map(|(_, label)| label)
    }
}

fn check_weight(weight: f64) -> Result<()> {
    if weight.is_nan() || weight < 0.0 {
        return Err(QuickpropError::InvalidWeight { weight });
    }
    Ok(())
}
