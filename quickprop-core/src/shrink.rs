//! Shrink search over failing argument tuples.
//!
//! Each round asks every generator for smaller candidates of its argument,
//! tries every combination of them, and keeps the combinations that still
//! fail as the next round's starting points. Combining positions, rather
//! than shrinking one argument at a time, lets the search find
//! counterexamples that only fail when several arguments shrink together.

use tracing::debug;

use crate::data::Size;
use crate::error::Result;
use crate::property::{Generators, Property, Verdict};

/// Iterator over every index combination for positions of the given
/// lengths, in lexicographic order with the last position varying fastest.
///
/// Zero positions yield a single empty combination. A position of length
/// zero yields nothing.
#[derive(Debug, Clone)]
pub struct CrossProduct {
    lens: Vec<usize>,
    next: Option<Vec<usize>>,
}

pub fn cross_product(lens: &[usize]) -> CrossProduct {
    let next = if lens.contains(&0) {
        None
    } else {
        Some(vec![0; lens.len()])
    };
    CrossProduct {
        lens: lens.to_vec(),
        next,
    }
}

impl Iterator for CrossProduct {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;

        let mut following = current.clone();
        for position in (0..following.len()).rev() {
            following[position] += 1;
            if following[position] < self.lens[position] {
                self.next = Some(following);
                break;
            }
            following[position] = 0;
        }

        Some(current)
    }
}

/// Search for a smaller tuple than `original` that still fails.
///
/// Runs at most `max_shrink` rounds. In the last round the first failing
/// candidate is returned straight away. Returns `None` when no candidate
/// ever reproduced the failure, in which case `original` is the smallest
/// known counterexample.
pub fn shrink_search<G: Generators>(
    property: &Property<G>,
    size: Size,
    original: &G::Args,
    max_shrink: usize,
) -> Result<Option<G::Args>> {
    let generators = property.generators();
    let mut frontier = vec![original.clone()];
    let mut best = None;

    for round in 0..max_shrink {
        let last_round = round + 1 == max_shrink;
        let candidates: Vec<G::Args> = frontier
            .iter()
            .flat_map(|args| generators.shrink_all(size, args))
            .collect();

        if candidates.is_empty() {
            debug!(property = property.name(), round, "nothing left to shrink");
            break;
        }

        debug!(
            property = property.name(),
            round,
            frontier = frontier.len(),
            candidates = candidates.len(),
            "shrink round"
        );

        let mut failing = Vec::new();
        for candidate in candidates {
            if property.trial(&candidate)?.1 == Verdict::Fail {
                if last_round {
                    return Ok(Some(candidate));
                }
                failing.push(candidate);
            }
        }

        match failing.first() {
            Some(first) => best = Some(first.clone()),
            None => break,
        }
        frontier = failing;
    }

    Ok(best)
}
