//! Shrinking properties
//!
//! A shrunk counterexample must itself fail, and must be smaller than the
//! case it came from by its generators' own measure.

use crate::{assert_holds, seeds};
use quickprop::*;

/// Property: re-running the body on a shrunk case fails again
pub fn test_shrunk_case_fails() {
    assert_holds(Property::new(
        "shrunk case fails",
        (range(1, 100), seeds()),
        |c, &(threshold, seed)| {
            let inner = Property::new("small sums", (int(), int()), move |c, &(a, b)| {
                c.assert(a + b < threshold)
            });
            let result = Runner::seeded(Config::default(), seed).run(&inner)?;

            if let TestResult::Fail {
                shrunk_case: Some(shrunk),
                ..
            } = &result
            {
                c.classify(true, "shrunk");
                c.note_arg(shrunk);
                let (_, verdict) = inner.trial(shrunk)?;
                c.assert(verdict == Verdict::Fail)?;
            }
            Ok(())
        },
    ));
}

/// Property: a positive counterexample shrinks to a smaller positive one
pub fn test_shrinks_positive_int() {
    let inner = Property::new("positive is negative", (int(),), |c, &(v,)| {
        c.guard(v > 0)?;
        c.assert(v < 0)
    });
    assert_eq!(
        shrink_search(&inner, Size(40), &(37,), 3).unwrap(),
        Some((5,))
    );

    assert_holds(Property::new(
        "positive shrinks stay positive",
        (range(2, 10_000),),
        move |c, &(v,)| {
            let shrunk = shrink_search(&inner, Size(0), &(v,), DEFAULT_MAX_SHRINK)?;
            c.note_arg(shrunk);
            c.assert(shrunk.map_or(false, |(s,)| 0 < s && s < v))
        },
    ));
}

/// Property: both arguments of a pair shrink together
pub fn test_shrinks_pairs() {
    let both_large = Property::new("not both large", (int(), int()), |c, &(a, b)| {
        c.assert(a < 10 || b < 10)
    });
    let shrunk = shrink_search(&both_large, Size(0), &(40, 40), 3)
        .unwrap()
        .unwrap();
    assert!(shrunk.0 >= 10 && shrunk.1 >= 10);
    assert!(shrunk.0 < 40 && shrunk.1 < 40);

    // A custom strategy that halves the vector instead of dropping one value.
    let halving = vec_of(whole_below(100)).with_shrink(|_, values| {
        if values.len() < 2 {
            None
        } else {
            Some(vec![values[..values.len() / 2].to_vec(), values[values.len() / 2..].to_vec()])
        }
    });
    let no_large = Property::new("no large values", (halving,), |c, (values,)| {
        c.assert(values.iter().all(|v| *v < 90))
    });
    let original = (vec![1, 2, 95, 3, 4, 5, 6, 7],);
    let shrunk = shrink_search(&no_large, Size(8), &original, 3)
        .unwrap()
        .unwrap();
    assert_eq!(shrunk.0, vec![95]);
}
