//! The generator protocol and a small library of built-in generators.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::rc::Rc;

use rand::{Rng, RngCore};

use crate::data::Size;
use crate::distribution::Distribution;
use crate::error::Result;

/// A source of test values.
///
/// `produce` is required. `shrink` is optional: the default returns `None`,
/// meaning the generator cannot propose smaller values and the shrink search
/// keeps its argument fixed. Returning an empty vector means the same thing.
pub trait Generator {
    type Value: Clone + Debug;

    /// Produce a value, using `size` to bound how large it may be.
    fn produce(&self, size: Size, rng: &mut dyn RngCore) -> Self::Value;

    /// Propose smaller candidates for a value this generator produced at
    /// `size`, most preferred first.
    fn shrink(&self, _size: Size, _value: &Self::Value) -> Option<Vec<Self::Value>> {
        None
    }

    /// Erase the concrete generator type.
    fn boxed(self) -> BoxedGen<Self::Value>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// A type-erased generator.
pub type BoxedGen<T> = Box<dyn Generator<Value = T>>;

impl<G: Generator + ?Sized> Generator for Box<G> {
    type Value = G::Value;

    fn produce(&self, size: Size, rng: &mut dyn RngCore) -> Self::Value {
        (**self).produce(size, rng)
    }

    fn shrink(&self, size: Size, value: &Self::Value) -> Option<Vec<Self::Value>> {
        (**self).shrink(size, value)
    }
}

impl<G: Generator + ?Sized> Generator for Rc<G> {
    type Value = G::Value;

    fn produce(&self, size: Size, rng: &mut dyn RngCore) -> Self::Value {
        (**self).produce(size, rng)
    }

    fn shrink(&self, size: Size, value: &Self::Value) -> Option<Vec<Self::Value>> {
        (**self).shrink(size, value)
    }
}

/// A whole number in `[0, top)`, or 0 when `top` is 0.
pub fn rand_whole(rng: &mut dyn RngCore, top: u64) -> u64 {
    if top == 0 {
        0
    } else {
        rng.gen_range(0..top)
    }
}

/// An integer in `[-top, top)`, or 0 when `top` is 0.
pub fn rand_int(rng: &mut dyn RngCore, top: u64) -> i64 {
    let top = top.min(i64::MAX as u64);
    let whole = rand_whole(rng, top * 2);
    (whole as i128 - top as i128) as i64
}

/// An integer between the two bounds, including the smaller one and
/// excluding the larger. Equal bounds yield that value.
pub fn rand_range(rng: &mut dyn RngCore, a: i64, b: i64) -> i64 {
    let (lo, hi) = (a.min(b), a.max(b));
    let span = (hi as i128 - lo as i128) as u64;
    (lo as i128 + rand_whole(rng, span) as i128) as i64
}

/// A float in `[0, 1)`.
pub fn rand_float_unit(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Candidates for a whole number: `x - x/2`, `x - x/4`, ... up to `x - 1`.
pub fn shrink_whole(x: u64) -> Vec<u64> {
    let mut candidates = Vec::new();
    let mut step = x;
    loop {
        step /= 2;
        if step == 0 {
            break;
        }
        candidates.push(x - step);
    }
    candidates
}

/// Candidates for an integer: its negation when negative, then halving
/// steps toward `x` like [`shrink_whole`].
pub fn shrink_int(x: i64) -> Vec<i64> {
    let mut candidates = Vec::new();
    if x < 0 {
        candidates.extend(x.checked_neg());
    }
    let mut step = x;
    loop {
        // Integer division truncates toward zero for both signs.
        step /= 2;
        if step == 0 {
            break;
        }
        candidates.push(x - step);
    }
    candidates
}

fn non_empty<T>(candidates: Vec<T>) -> Option<Vec<T>> {
    if candidates.is_empty() {
        None
    } else {
        Some(candidates)
    }
}

/// Whole numbers bounded by the size, or by a fixed top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Whole {
    top: Option<u64>,
}

/// Whole numbers in `[0, size)`.
pub fn whole() -> Whole {
    Whole { top: None }
}

/// Whole numbers in `[0, top)`, whatever the size.
pub fn whole_below(top: u64) -> Whole {
    Whole { top: Some(top) }
}

impl Generator for Whole {
    type Value = u64;

    fn produce(&self, size: Size, rng: &mut dyn RngCore) -> u64 {
        let top = self.top.unwrap_or(size.get() as u64);
        rand_whole(rng, top)
    }

    fn shrink(&self, _size: Size, value: &u64) -> Option<Vec<u64>> {
        non_empty(shrink_whole(*value))
    }
}

/// Integers in `[-size, size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int;

pub fn int() -> Int {
    Int
}

impl Generator for Int {
    type Value = i64;

    fn produce(&self, size: Size, rng: &mut dyn RngCore) -> i64 {
        rand_int(rng, size.get() as u64)
    }

    fn shrink(&self, _size: Size, value: &i64) -> Option<Vec<i64>> {
        non_empty(shrink_int(*value))
    }
}

/// Integers between two fixed bounds; see [`rand_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    lo: i64,
    hi: i64,
}

pub fn range(a: i64, b: i64) -> IntRange {
    IntRange {
        lo: a.min(b),
        hi: a.max(b),
    }
}

impl Generator for IntRange {
    type Value = i64;

    fn produce(&self, _size: Size, rng: &mut dyn RngCore) -> i64 {
        rand_range(rng, self.lo, self.hi)
    }

    /// The lower bound first, then halving steps toward the value.
    fn shrink(&self, _size: Size, value: &i64) -> Option<Vec<i64>> {
        if *value <= self.lo {
            return None;
        }
        let distance = (*value as i128 - self.lo as i128) as u64;
        let mut candidates = vec![self.lo];
        candidates.extend(
            shrink_whole(distance)
                .into_iter()
                .map(|step| (self.lo as i128 + step as i128) as i64),
        );
        Some(candidates)
    }
}

/// Floats in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatUnit;

pub fn float_unit() -> FloatUnit {
    FloatUnit
}

impl Generator for FloatUnit {
    type Value = f64;

    fn produce(&self, _size: Size, rng: &mut dyn RngCore) -> f64 {
        rand_float_unit(rng)
    }

    fn shrink(&self, _size: Size, value: &f64) -> Option<Vec<f64>> {
        let mut candidates = Vec::new();
        if *value < 0.0 {
            candidates.push(-value);
        }
        let truncated = value.trunc();
        if truncated != *value && !value.is_nan() {
            candidates.push(truncated);
        }
        non_empty(candidates)
    }
}

/// The size itself. Useful for properties about sizes, or as a seed for
/// generating inside the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JustSize;

pub fn just_size() -> JustSize {
    JustSize
}

impl Generator for JustSize {
    type Value = usize;

    fn produce(&self, size: Size, _rng: &mut dyn RngCore) -> usize {
        size.get()
    }
}

/// A generator built from a closure. It never shrinks.
pub struct FromFn<F, T> {
    f: F,
    _value: PhantomData<fn() -> T>,
}

pub fn from_fn<T, F>(f: F) -> FromFn<F, T>
where
    T: Clone + Debug,
    F: Fn(Size, &mut dyn RngCore) -> T,
{
    FromFn {
        f,
        _value: PhantomData,
    }
}

impl<T, F> Generator for FromFn<F, T>
where
    T: Clone + Debug,
    F: Fn(Size, &mut dyn RngCore) -> T,
{
    type Value = T;

    fn produce(&self, size: Size, rng: &mut dyn RngCore) -> T {
        (self.f)(size, rng)
    }
}

type VecShrinker<T> = Rc<dyn Fn(Size, &Vec<T>) -> Option<Vec<Vec<T>>>>;

/// Vectors with a length drawn from `[0, size)`.
pub struct VecOf<G: Generator> {
    inner: G,
    shrinker: VecShrinker<G::Value>,
}

/// Vectors of values from `inner`. Shrinks by dropping one element at a time.
pub fn vec_of<G: Generator>(inner: G) -> VecOf<G>
where
    G::Value: 'static,
{
    VecOf {
        inner,
        shrinker: Rc::new(|_size, values: &Vec<G::Value>| non_empty(remove_one(values))),
    }
}

impl<G: Generator> VecOf<G> {
    /// Replace the shrink strategy.
    pub fn with_shrink<F>(mut self, shrinker: F) -> Self
    where
        F: Fn(Size, &Vec<G::Value>) -> Option<Vec<Vec<G::Value>>> + 'static,
    {
        self.shrinker = Rc::new(shrinker);
        self
    }
}

/// Every copy of `values` with exactly one element removed.
pub fn remove_one<T: Clone>(values: &[T]) -> Vec<Vec<T>> {
    (0..values.len())
        .map(|skip| {
            values
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != skip)
                .map(|(_, value)| value.clone())
                .collect()
        })
        .collect()
}

impl<G: Generator> Generator for VecOf<G> {
    type Value = Vec<G::Value>;

    fn produce(&self, size: Size, rng: &mut dyn RngCore) -> Self::Value {
        let length = rand_whole(rng, size.get() as u64);
        (0..length).map(|_| self.inner.produce(size, rng)).collect()
    }

    fn shrink(&self, size: Size, value: &Self::Value) -> Option<Vec<Self::Value>> {
        (self.shrinker)(size, value)
    }
}

/// Chance that [`optional`] produces `None`.
pub const NONE_PROBABILITY: f64 = 0.1;

/// `None` now and then, otherwise a value from the inner generator.
pub struct Optional<G> {
    inner: G,
}

pub fn optional<G: Generator>(inner: G) -> Optional<G> {
    Optional { inner }
}

impl<G: Generator> Generator for Optional<G> {
    type Value = Option<G::Value>;

    fn produce(&self, size: Size, rng: &mut dyn RngCore) -> Self::Value {
        if rng.gen_bool(NONE_PROBABILITY) {
            None
        } else {
            Some(self.inner.produce(size, rng))
        }
    }

    /// `None` first, then the inner generator's candidates.
    fn shrink(&self, size: Size, value: &Self::Value) -> Option<Vec<Self::Value>> {
        let inner = value.as_ref()?;
        let mut candidates = vec![None];
        candidates.extend(
            self.inner
                .shrink(size, inner)
                .unwrap_or_default()
                .into_iter()
                .map(Some),
        );
        Some(candidates)
    }
}

/// One of a fixed set of values, drawn uniformly.
#[derive(Debug, Clone)]
pub struct Choose<T> {
    values: Distribution<T>,
}

/// Errors when `values` is empty.
pub fn choose<T: Clone + Debug>(values: impl IntoIterator<Item = T>) -> Result<Choose<T>> {
    Ok(Choose {
        values: Distribution::uniform(values)?,
    })
}

impl<T: Clone + Debug> Generator for Choose<T> {
    type Value = T;

    fn produce(&self, _size: Size, rng: &mut dyn RngCore) -> T {
        self.values.pick(rng).clone()
    }
}

/// `false` or `true` with equal odds. Never shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool;

pub fn boolean() -> Bool {
    Bool
}

impl Generator for Bool {
    type Value = bool;

    fn produce(&self, _size: Size, rng: &mut dyn RngCore) -> bool {
        rng.gen_bool(0.5)
    }
}

/// A weighted choice between generators of the same type.
pub struct Frequency<T> {
    choices: Distribution<BoxedGen<T>>,
}

/// Pick a generator per value in proportion to its weight.
pub fn frequency<T: Clone + Debug>(choices: Vec<(f64, BoxedGen<T>)>) -> Result<Frequency<T>> {
    Ok(Frequency {
        choices: Distribution::positional(choices)?,
    })
}

/// Pick a generator per value, each equally likely.
pub fn one_of<T: Clone + Debug>(generators: Vec<BoxedGen<T>>) -> Result<Frequency<T>> {
    Ok(Frequency {
        choices: Distribution::uniform(generators)?,
    })
}

impl<T: Clone + Debug> Generator for Frequency<T> {
    type Value = T;

    fn produce(&self, size: Size, rng: &mut dyn RngCore) -> T {
        self.choices.pick(rng).produce(size, rng)
    }
}
