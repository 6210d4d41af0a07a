//! Error types and property outcomes for quickprop.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

use crate::case::Stats;

/// Main error type for quickprop.
///
/// None of these describe a property failing. A failing property is a
/// normal [`TestResult::Fail`]; these are the conditions the engine has no
/// policy for.
#[derive(Error, Debug)]
pub enum QuickpropError {
    /// A test body returned an error that is neither an assertion failure
    /// nor an invalid case.
    #[error("Property `{property}` raised an error: {source}")]
    Body {
        property: String,
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A distribution was built from weights that cannot be normalized.
    #[error("Invalid distribution: total weight {total} must be positive and finite")]
    InvalidDistribution { total: f64 },

    /// A single weight was negative or not a number.
    #[error("Invalid distribution weight: {weight}")]
    InvalidWeight { weight: f64 },
}

/// Result type for quickprop operations.
pub type Result<T> = std::result::Result<T, QuickpropError>;

/// Why a trial stopped before its body returned normally.
///
/// `AssertionFailed` and `CaseInvalid` are the two signals the runner
/// understands. Every other error a body produces ends up in `Error` and is
/// propagated out of the run untouched.
///
/// `Interrupt` deliberately does not implement [`std::error::Error`], which
/// lets any error type convert into it with `?`.
#[derive(Debug)]
pub enum Interrupt {
    /// `Case::assert` saw a false condition.
    AssertionFailed,
    /// `Case::guard` saw a false condition.
    CaseInvalid,
    /// Any other error raised by the body.
    Error(Box<dyn StdError + Send + Sync>),
}

impl Interrupt {
    /// Wrap an arbitrary error or message.
    pub fn other(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Interrupt::Error(error.into())
    }

    /// Whether this is one of the two trial signals.
    pub fn is_signal(&self) -> bool {
        !matches!(self, Interrupt::Error(_))
    }
}

impl<E> From<E> for Interrupt
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Interrupt::Error(Box::new(error))
    }
}

impl fmt::Display for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interrupt::AssertionFailed => write!(f, "assertion failed"),
            Interrupt::CaseInvalid => write!(f, "invalid case"),
            Interrupt::Error(error) => write!(f, "{error}"),
        }
    }
}

/// What a test body returns.
pub type TrialResult = std::result::Result<(), Interrupt>;

/// A counterexample already rendered to text.
///
/// Properties have different argument types; listeners see them all through
/// this one type.
#[derive(Clone, PartialEq, Eq)]
pub struct Rendered(pub String);

impl fmt::Debug for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of running one property.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult<A> {
    /// Enough trials passed.
    Pass { name: String, stats: Stats },

    /// The invalid budget ran out before a single trial passed.
    Invalid { name: String, stats: Stats },

    /// A trial failed its assertion.
    Fail {
        name: String,
        stats: Stats,
        /// Arguments of the failing trial.
        failed_case: A,
        /// Smallest counterexample the shrink search confirmed, if any.
        shrunk_case: Option<A>,
        /// Values the failing trial recorded with `Case::note_arg`.
        notes: Vec<String>,
        /// Tags the failing trial classified itself with.
        tags: Vec<String>,
    },
}

impl<A> TestResult<A> {
    /// Name of the property this result belongs to.
    pub fn name(&self) -> &str {
        match self {
            TestResult::Pass { name, .. }
            | TestResult::Invalid { name, .. }
            | TestResult::Fail { name, .. } => name,
        }
    }

    /// Statistics gathered over the run.
    pub fn stats(&self) -> &Stats {
        match self {
            TestResult::Pass { stats, .. }
            | TestResult::Invalid { stats, .. }
            | TestResult::Fail { stats, .. } => stats,
        }
    }

    /// Short status word: `pass`, `invalid` or `fail`.
    pub fn status(&self) -> &'static str {
        match self {
            TestResult::Pass { .. } => "pass",
            TestResult::Invalid { .. } => "invalid",
            TestResult::Fail { .. } => "fail",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, TestResult::Invalid { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, TestResult::Fail { .. })
    }

    /// The smallest known counterexample: the shrunk case when shrinking
    /// confirmed one, otherwise the original failing case.
    pub fn minimal_case(&self) -> Option<&A> {
        match self {
            TestResult::Fail {
                failed_case,
                shrunk_case,
                ..
            } => Some(shrunk_case.as_ref().unwrap_or(failed_case)),
            _ => None,
        }
    }

    /// Render the arguments to text so results of different properties can
    /// be handled together.
    pub fn render(self) -> TestResult<Rendered>
    where
        A: fmt::Debug,
    {
        match self {
            TestResult::Pass { name, stats } => TestResult::Pass { name, stats },
            TestResult::Invalid { name, stats } => TestResult::Invalid { name, stats },
            TestResult::Fail {
                name,
                stats,
                failed_case,
                shrunk_case,
                notes,
                tags,
            } => TestResult::Fail {
                name,
                stats,
                failed_case: Rendered(format!("{failed_case:?}")),
                shrunk_case: shrunk_case.map(|case| Rendered(format!("{case:?}"))),
                notes,
                tags,
            },
        }
    }
}

impl<A: fmt::Debug> fmt::Display for TestResult<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass { name, stats } => {
                write!(f, "  ✓ {} passed {} tests.", name, stats.pass)?;
                write_statistics(f, stats)
            }
            TestResult::Invalid { name, stats } => {
                write!(
                    f,
                    "  ⚐ {} gave up after {} discards.",
                    name, stats.invalid
                )?;
                write_statistics(f, stats)
            }
            TestResult::Fail {
                name,
                stats,
                failed_case,
                shrunk_case,
                notes,
                tags,
            } => {
                write!(
                    f,
                    "  ✗ {} failed after {} tests and {} discards.",
                    name, stats.pass, stats.invalid
                )?;
                if !tags.is_empty() {
                    write!(f, " (tags: {})", tags.join(", "))?;
                }
                writeln!(f)?;
                writeln!(f, "    Failed case: {failed_case:?}")?;
                if !notes.is_empty() {
                    writeln!(f, "    Noted: {}", notes.join(", "))?;
                }
                match shrunk_case {
                    Some(shrunk) => write!(f, "    Minimal counterexample: {shrunk:?}"),
                    None => write!(f, "    Minimal counterexample: {failed_case:?}"),
                }
            }
        }
    }
}

fn write_statistics(f: &mut fmt::Formatter<'_>, stats: &Stats) -> fmt::Result {
    let observed = stats.observed().max(1) as f64;

    if !stats.tags.is_empty() {
        writeln!(f)?;
        write!(f, "  Test data distribution:")?;
        for (tag, count) in &stats.tags {
            let percentage = (*count as f64 / observed) * 100.0;
            write!(f, "\n    {percentage:>3.0}% {tag}")?;
        }
    }

    if let Some(distribution) = stats.distribution() {
        writeln!(f)?;
        write!(f, "  Collected values:")?;
        for (probability, label) in distribution.by_probability() {
            write!(f, "\n    {:>5.1}% {}", probability * 100.0, label)?;
        }
    }

    Ok(())
}
