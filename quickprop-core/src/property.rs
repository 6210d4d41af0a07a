//! Property declarations and the argument tuples they are tested with.

use std::fmt::{self, Debug};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::case::Case;
use crate::data::{Config, Size};
use crate::error::{Interrupt, QuickpropError, Rendered, Result, TestResult, TrialResult};
use crate::gen::Generator;
use crate::runner::run_property;
use crate::shrink::cross_product;

/// An ordered list of generators, one per property argument.
///
/// Implemented for `()` and for tuples of up to eight [`Generator`]s. The
/// argument tuple mirrors the generator tuple: `(int(), vec_of(int()))`
/// produces `(i64, Vec<i64>)`.
pub trait Generators {
    type Args: Clone + Debug;

    /// Produce one argument per generator, in declaration order.
    fn produce_all(&self, size: Size, rng: &mut dyn RngCore) -> Self::Args;

    /// Every combination of independently shrunk arguments.
    ///
    /// A position whose generator offers no candidates stays fixed at its
    /// current value. When no position offers any candidate the result is
    /// empty. Combinations are ordered lexicographically by candidate index,
    /// the last position varying fastest.
    fn shrink_all(&self, size: Size, args: &Self::Args) -> Vec<Self::Args>;

    /// Number of arguments.
    fn arity(&self) -> usize;
}

impl Generators for () {
    type Args = ();

    fn produce_all(&self, _size: Size, _rng: &mut dyn RngCore) {}

    fn shrink_all(&self, _size: Size, _args: &()) -> Vec<()> {
        Vec::new()
    }

    fn arity(&self) -> usize {
        0
    }
}

fn candidates_for<G: Generator>(
    generator: &G,
    size: Size,
    value: &G::Value,
    shrunk: &mut usize,
) -> Vec<G::Value> {
    match generator.shrink(size, value) {
        Some(candidates) if !candidates.is_empty() => {
            *shrunk += 1;
            candidates
        }
        _ => vec![value.clone()],
    }
}

macro_rules! impl_generators {
    ($arity:expr; $($idx:tt => $gen:ident, $candidates:ident);+) => {
        impl<$($gen: Generator),+> Generators for ($($gen,)+) {
            type Args = ($($gen::Value,)+);

            fn produce_all(&self, size: Size, rng: &mut dyn RngCore) -> Self::Args {
                ($(self.$idx.produce(size, rng),)+)
            }

            fn shrink_all(&self, size: Size, args: &Self::Args) -> Vec<Self::Args> {
                let mut shrunk = 0;
                $(let $candidates = candidates_for(&self.$idx, size, &args.$idx, &mut shrunk);)+
                if shrunk == 0 {
                    return Vec::new();
                }
                cross_product(&[$($candidates.len()),+])
                    .map(|index| ($($candidates[index[$idx]].clone(),)+))
                    .collect()
            }

            fn arity(&self) -> usize {
                $arity
            }
        }
    };
}

impl_generators!(1; 0 => A, a);
impl_generators!(2; 0 => A, a; 1 => B, b);
impl_generators!(3; 0 => A, a; 1 => B, b; 2 => C, c);
impl_generators!(4; 0 => A, a; 1 => B, b; 2 => C, c; 3 => D, d);
impl_generators!(5; 0 => A, a; 1 => B, b; 2 => C, c; 3 => D, d; 4 => E, e);
impl_generators!(6; 0 => A, a; 1 => B, b; 2 => C, c; 3 => D, d; 4 => E, e; 5 => F, f);
impl_generators!(7; 0 => A, a; 1 => B, b; 2 => C, c; 3 => D, d; 4 => E, e; 5 => F, f; 6 => G, g);
impl_generators!(8; 0 => A, a; 1 => B, b; 2 => C, c; 3 => D, d; 4 => E, e; 5 => F, f; 6 => G, g; 7 => H, h);

/// How a single trial ended, once plain errors have been split off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Invalid,
    Fail,
}

type Body<A> = Box<dyn Fn(&mut Case, &A) -> TrialResult>;

/// A named assertion over generated arguments.
///
/// ```
/// use quickprop_core::*;
///
/// let property = Property::new("whole numbers stay below 10", (whole_below(10),), |c, &(v,)| {
///     c.assert(v < 10)
/// });
/// let result = property.run(&Config::new(50, 100)).unwrap();
/// assert!(result.is_pass());
/// assert_eq!(result.stats().pass, 50);
/// ```
pub struct Property<G: Generators> {
    name: String,
    generators: G,
    body: Body<G::Args>,
}

impl<G: Generators> Property<G> {
    /// Create a property from a name, a tuple of generators and a body.
    pub fn new<F>(name: impl Into<String>, generators: G, body: F) -> Self
    where
        F: Fn(&mut Case, &G::Args) -> TrialResult + 'static,
    {
        Property {
            name: name.into(),
            generators,
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generators(&self) -> &G {
        &self.generators
    }

    /// Run the body against `args` in a fresh case.
    pub fn execute(&self, args: &G::Args) -> (Case, TrialResult) {
        let mut case = Case::new();
        let outcome = (self.body)(&mut case, args);
        (case, outcome)
    }

    /// Run the body against `args` and classify the outcome. Errors that are
    /// not trial signals are returned as [`QuickpropError::Body`].
    pub fn trial(&self, args: &G::Args) -> Result<(Case, Verdict)> {
        let (case, outcome) = self.execute(args);
        let verdict = match outcome {
            Ok(()) => Verdict::Pass,
            Err(Interrupt::CaseInvalid) => Verdict::Invalid,
            Err(Interrupt::AssertionFailed) => Verdict::Fail,
            Err(Interrupt::Error(source)) => {
                return Err(QuickpropError::Body {
                    property: self.name.clone(),
                    source,
                })
            }
        };
        Ok((case, verdict))
    }

    /// Run this property once with a fresh entropy-seeded generator.
    pub fn run(&self, config: &Config) -> Result<TestResult<G::Args>> {
        let mut rng = StdRng::from_entropy();
        run_property(self, config, &mut rng)
    }
}

impl<G: Generators> Debug for Property<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("arity", &self.generators.arity())
            .finish_non_exhaustive()
    }
}

/// A property with its argument types erased, so properties of different
/// shapes can be stored and run together.
pub trait Check {
    fn name(&self) -> &str;

    /// Run to completion and render the result.
    fn check(&self, config: &Config, rng: &mut dyn RngCore) -> Result<TestResult<Rendered>>;
}

impl<G: Generators> Check for Property<G> {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, config: &Config, rng: &mut dyn RngCore) -> Result<TestResult<Rendered>> {
        run_property(self, config, rng).map(TestResult::render)
    }
}
