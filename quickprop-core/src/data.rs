//! Core data types for quickprop property testing.

use std::fmt;

use crate::error::{QuickpropError, Result};

/// Size parameter for controlling test data generation.
///
/// The runner starts every property at size 0 and grows it by one after each
/// trial, so later trials see larger inputs without any tuning by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Size(pub usize);

impl Size {
    /// Create a new size value.
    pub fn new(value: usize) -> Self {
        Size(value)
    }

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// The size used for the following trial.
    pub fn next(&self) -> Self {
        Size(self.0.saturating_add(1))
    }
}

impl From<usize> for Size {
    fn from(value: usize) -> Self {
        Size(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// Default number of shrink rounds when none is given.
pub const DEFAULT_MAX_SHRINK: usize = 3;

/// Configuration for running properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Passing trials needed before a property is considered to hold.
    pub max_pass: usize,

    /// Discarded trials tolerated before giving up on a property.
    pub max_invalid: usize,

    /// Rounds of shrink search performed on a failing case.
    pub max_shrink: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_pass: 100,
            max_invalid: 1000,
            max_shrink: DEFAULT_MAX_SHRINK,
        }
    }
}

impl Config {
    /// Create a config with the given pass and invalid budgets and the
    /// default number of shrink rounds.
    pub fn new(max_pass: usize, max_invalid: usize) -> Self {
        Config {
            max_pass,
            max_invalid,
            max_shrink: DEFAULT_MAX_SHRINK,
        }
    }

    /// Set the number of passing trials to run.
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.max_pass = passes;
        self
    }

    /// Set the number of invalid trials tolerated.
    pub fn with_invalid(mut self, invalid: usize) -> Self {
        self.max_invalid = invalid;
        self
    }

    /// Set the number of shrink rounds.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.max_shrink = shrinks;
        self
    }

    /// Whether a property with these counts should keep running trials.
    pub fn needs_work(&self, pass: usize, invalid: usize) -> bool {
        pass < self.max_pass && invalid < self.max_invalid
    }

    /// Reject limits that are not positive.
    pub fn validate(&self) -> Result<()> {
        let zero = [
            ("max_pass", self.max_pass),
            ("max_invalid", self.max_invalid),
            ("max_shrink", self.max_shrink),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0);

        match zero {
            Some((field, _)) => Err(QuickpropError::InvalidConfig {
                message: format!("{field} must be positive"),
            }),
            None => Ok(()),
        }
    }
}
