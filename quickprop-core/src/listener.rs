//! Receiving results from a suite run.

use tracing::{info, warn};

use crate::error::{Rendered, TestResult};

/// Receives one result per property, in declaration order, then `done` once
/// after the last.
///
/// Implementations must accept every result shape without panicking.
pub trait Listener {
    fn note_result(&mut self, result: &TestResult<Rendered>);

    fn done(&mut self) {}
}

/// Where a [`ConsoleListener`] writes its lines.
pub trait Sink {
    fn log(&mut self, line: &str);

    fn warn(&mut self, line: &str);
}

/// Log lines to stdout, warnings to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn log(&mut self, line: &str) {
        println!("{line}");
    }

    fn warn(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Forward lines as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn log(&mut self, line: &str) {
        info!(target: "quickprop", "{line}");
    }

    fn warn(&mut self, line: &str) {
        warn!(target: "quickprop", "{line}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Log,
    Warn,
}

/// Keep every line in memory.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<(Channel, String)>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(Channel, String)] {
        &self.lines
    }

    /// Lines written to `channel`, in order.
    pub fn on(&self, channel: Channel) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(written, _)| *written == channel)
            .map(|(_, line)| line.as_str())
            .collect()
    }
}

impl Sink for Transcript {
    fn log(&mut self, line: &str) {
        self.lines.push((Channel::Log, line.to_string()));
    }

    fn warn(&mut self, line: &str) {
        self.lines.push((Channel::Warn, line.to_string()));
    }
}

/// A plain-text report of each result.
///
/// Anything other than a pass is announced on the warning channel first.
/// Failures are followed by their counterexample, then every result lists
/// its tag counts and its collected values from most to least frequent.
///
/// ```
/// use quickprop_core::*;
///
/// let mut registry = Registry::new();
/// registry.declare("lengths", (vec_of(int()),), |c, (values,)| {
///     c.collect(values.len().min(1));
///     Ok(())
/// });
///
/// let mut listener = ConsoleListener::new(Transcript::new());
/// Runner::seeded(Config::new(20, 20), 1)
///     .run_all(&registry, &mut listener, &mut Synchronous)
///     .unwrap();
///
/// let lines = listener.sink().on(Channel::Log);
/// assert_eq!(lines.first(), Some(&"lengths: 20 passed, 0 invalid"));
/// assert_eq!(lines.last(), Some(&"done."));
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleListener<S> {
    sink: S,
    max_collected: Option<usize>,
}

impl<S: Sink> ConsoleListener<S> {
    /// A listener that prints every collected value.
    pub fn new(sink: S) -> Self {
        ConsoleListener {
            sink,
            max_collected: None,
        }
    }

    /// Print at most `max` collected values per result. Zero hides the
    /// histogram entirely.
    pub fn with_max_collected(mut self, max: usize) -> Self {
        self.max_collected = Some(max);
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn log_counts(&mut self, result: &TestResult<Rendered>) {
        let stats = result.stats();
        let line = format!(
            "{}: {} passed, {} invalid",
            result.name(),
            stats.pass,
            stats.invalid
        );
        self.sink.log(&line);
    }

    fn log_failure(&mut self, result: &TestResult<Rendered>) {
        if let TestResult::Fail {
            failed_case,
            shrunk_case,
            notes,
            tags,
            ..
        } = result
        {
            self.sink.log("Failed case:");
            self.sink.log(&failed_case.0);
            if !notes.is_empty() {
                self.sink.log(&format!("noted: {}", notes.join(", ")));
            }
            if !tags.is_empty() {
                self.sink.log(&format!("with tags: {}", tags.join(", ")));
            }
            if let Some(shrunk) = shrunk_case {
                self.sink.log("Shrunk case:");
                self.sink.log(&shrunk.0);
            }
        }
    }

    fn log_tags(&mut self, result: &TestResult<Rendered>) {
        let tags = &result.stats().tags;
        if tags.is_empty() {
            return;
        }
        self.sink.log("tags:");
        for (tag, count) in tags {
            self.sink.log(&format!("{tag} : {count}"));
        }
    }

    fn log_collected(&mut self, result: &TestResult<Rendered>) {
        if self.max_collected == Some(0) {
            return;
        }
        let Some(distribution) = result.stats().distribution() else {
            return;
        };

        let mut entries = distribution.by_probability();
        if let Some(max) = self.max_collected {
            entries.truncate(max);
        }

        self.sink.log("collected:");
        for (probability, label) in entries {
            self.sink.log(&format!("{:.1}% : {}", probability * 100.0, label));
        }
    }
}

impl<S: Sink> Listener for ConsoleListener<S> {
    fn note_result(&mut self, result: &TestResult<Rendered>) {
        if !result.is_pass() {
            let line = format!("{}: {}", result.status(), result.name());
            self.sink.warn(&line);
        }
        self.log_counts(result);
        self.log_failure(result);
        self.log_tags(result);
        self.log_collected(result);
    }

    fn done(&mut self) {
        self.sink.log("done.");
    }
}
