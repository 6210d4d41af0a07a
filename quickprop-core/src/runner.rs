//! Driving properties to a result, one at a time or as a whole suite.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, trace, warn};

use crate::case::Stats;
use crate::data::{Config, Size};
use crate::error::{Rendered, Result, TestResult};
use crate::listener::Listener;
use crate::property::{Generators, Property, Verdict};
use crate::registry::Registry;
use crate::shrink::shrink_search;

/// Run trials of `property` until it has passed `max_pass` times, used up
/// `max_invalid` discards, or failed.
///
/// Size starts at 0 and grows by one after every trial. A failure stops the
/// run at once and starts the shrink search from the failing arguments at
/// the size they were produced with.
pub fn run_property<G: Generators>(
    property: &Property<G>,
    config: &Config,
    rng: &mut dyn RngCore,
) -> Result<TestResult<G::Args>> {
    config.validate()?;

    let name = property.name();
    let mut stats = Stats::new();
    let mut size = Size::default();

    while config.needs_work(stats.pass, stats.invalid) {
        let args = property.generators().produce_all(size, rng);
        let (case, verdict) = property.trial(&args)?;
        trace!(property = name, size = size.get(), ?verdict, "trial");

        match verdict {
            Verdict::Pass => {
                stats.pass += 1;
                stats.absorb(&case);
            }
            Verdict::Invalid => stats.invalid += 1,
            Verdict::Fail => {
                stats.absorb(&case);
                debug!(
                    property = name,
                    pass = stats.pass,
                    invalid = stats.invalid,
                    "failed, shrinking"
                );
                let shrunk_case = shrink_search(property, size, &args, config.max_shrink)?;
                let (notes, tags) = case.into_report();
                return Ok(TestResult::Fail {
                    name: name.to_string(),
                    stats,
                    failed_case: args,
                    shrunk_case,
                    notes,
                    tags,
                });
            }
        }

        size = size.next();
    }

    if stats.pass > 0 {
        debug!(property = name, pass = stats.pass, invalid = stats.invalid, "passed");
        Ok(TestResult::Pass {
            name: name.to_string(),
            stats,
        })
    } else {
        warn!(property = name, invalid = stats.invalid, "no trial passed its guards");
        Ok(TestResult::Invalid {
            name: name.to_string(),
            stats,
        })
    }
}

/// Where the suite driver hands control back to its host between
/// properties.
pub trait Scheduler {
    fn yield_now(&mut self);
}

/// Run every property back to back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synchronous;

impl Scheduler for Synchronous {
    fn yield_now(&mut self) {}
}

/// Let other threads run between properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadYield;

impl Scheduler for ThreadYield {
    fn yield_now(&mut self) {
        std::thread::yield_now();
    }
}

/// Any closure can act as a host hook.
impl<F: FnMut()> Scheduler for F {
    fn yield_now(&mut self) {
        self()
    }
}

/// Counts of each outcome across a suite run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub invalid: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, result: &TestResult<Rendered>) {
        match result {
            TestResult::Pass { .. } => self.passed += 1,
            TestResult::Invalid { .. } => self.invalid += 1,
            TestResult::Fail { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.invalid + self.failed
    }

    /// True when nothing failed. Invalid properties do not count as
    /// failures.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Runs properties with one configuration and one random number generator.
#[derive(Debug)]
pub struct Runner {
    config: Config,
    rng: StdRng,
}

impl Runner {
    /// A runner seeded from system entropy.
    pub fn new(config: Config) -> Self {
        Runner {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// A runner whose draws are fully determined by `seed`.
    pub fn seeded(config: Config, seed: u64) -> Self {
        Runner {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a single property.
    pub fn run<G: Generators>(&mut self, property: &Property<G>) -> Result<TestResult<G::Args>> {
        run_property(property, &self.config, &mut self.rng)
    }

    /// Run every registered property in declaration order.
    ///
    /// The listener sees each result as soon as its property finishes, then
    /// `done` once after the last one. The scheduler is asked to yield
    /// between properties only. An error raised by a body stops the suite
    /// and is returned without calling `done`.
    pub fn run_all(
        &mut self,
        registry: &Registry,
        listener: &mut dyn Listener,
        scheduler: &mut dyn Scheduler,
    ) -> Result<Summary> {
        self.config.validate()?;

        let mut summary = Summary::default();
        let mut properties = registry.iter().peekable();

        while let Some(property) = properties.next() {
            let result = property.check(&self.config, &mut self.rng)?;
            debug!(property = property.name(), status = result.status(), "finished");
            summary.record(&result);
            listener.note_result(&result);

            if properties.peek().is_some() {
                scheduler.yield_now();
            }
        }

        listener.done();
        Ok(summary)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Runner::new(Config::default())
    }
}
