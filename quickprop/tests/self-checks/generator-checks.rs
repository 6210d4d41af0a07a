//! Generator self checks
//!
//! Bounds of the random helpers and built-in generators. Checks that only
//! guard are existence checks: they pass once some trial shows the value.

use crate::{assert_holds, rng_from, seeds, SEED};
use quickprop::*;

/// Property: rand_whole stays below its top, or is 0
pub fn test_rand_whole_bounds() {
    assert_holds(Property::new(
        "rand_whole",
        (just_size(), seeds()),
        |c, &(a, seed)| {
            let top = a as u64;
            let result = rand_whole(&mut rng_from(seed), top);
            c.note_arg(result);
            c.assert(result < top || result == 0)
        },
    ));
}

pub fn test_rand_whole_nonzero() {
    assert_holds(Property::new(
        "rand_whole nonzero",
        (just_size(), seeds()),
        |c, &(a, seed)| {
            c.guard(a > 10)?;
            let result = rand_whole(&mut rng_from(seed), a as u64);
            c.note_arg(result);
            c.guard(result > 0)
        },
    ));
}

pub fn test_rand_whole_zero() {
    assert_holds(Property::new(
        "rand_whole zero result",
        (just_size(), seeds()),
        |c, &(a, seed)| {
            let result = rand_whole(&mut rng_from(seed), a as u64);
            c.note_arg(result);
            c.guard(result == 0)
        },
    ));
}

pub fn test_rand_int_positive() {
    assert_holds(Property::new(
        "rand_int show positive",
        (whole(), seeds()),
        |c, &(a, seed)| {
            let result = rand_int(&mut rng_from(seed), a);
            c.note_arg(result);
            c.guard(result > 0)
        },
    ));
}

pub fn test_rand_int_negative() {
    assert_holds(Property::new(
        "rand_int show negative",
        (whole(), seeds()),
        |c, &(a, seed)| {
            let result = rand_int(&mut rng_from(seed), a);
            c.note_arg(result);
            c.guard(result < 0)
        },
    ));
}

pub fn test_rand_int_zero() {
    assert_holds(Property::new(
        "rand_int zero result",
        (whole(), seeds()),
        |c, &(a, seed)| {
            c.guard(a > 0)?;
            let result = rand_int(&mut rng_from(seed), a);
            c.note_arg(result);
            c.guard(result == 0)
        },
    ));
}

/// Property: for a < b, rand_range(a, b) lies in [a, b)
pub fn test_rand_range_between() {
    assert_holds(Property::new(
        "rand_range between",
        (int(), int(), seeds()),
        |c, &(a, b, seed)| {
            c.guard(a < b)?;
            let result = rand_range(&mut rng_from(seed), a, b);
            c.note_arg(result);
            c.assert(a <= result)?;
            c.assert(b > result)
        },
    ));
}

/// Property: for b < a, rand_range(a, b) lies in [b, a)
pub fn test_rand_range_backwards() {
    assert_holds(Property::new(
        "rand_range between backwards",
        (int(), int(), seeds()),
        |c, &(a, b, seed)| {
            c.guard(b < a)?;
            let result = rand_range(&mut rng_from(seed), a, b);
            c.note_arg(result);
            c.assert(b <= result)?;
            c.assert(a > result)
        },
    ));
}

pub fn test_rand_range_equal() {
    assert_holds(Property::new(
        "rand_range equal",
        (int(), seeds()),
        |c, &(a, seed)| c.assert(rand_range(&mut rng_from(seed), a, a) == a),
    ));
}

pub fn test_rand_float_unit() {
    assert_holds(Property::new("rand_float_unit", (seeds(),), |c, &(seed,)| {
        let result = rand_float_unit(&mut rng_from(seed));
        c.note_arg(result);
        c.assert(result >= 0.0)?;
        c.assert(result < 1.0)
    }));
}

/// Property: built-in generators respect their bounds
pub fn test_generator_bounds() {
    assert_holds(Property::new(
        "whole_below stays below",
        (whole_below(7),),
        |c, &(v,)| c.assert(v < 7),
    ));

    assert_holds(Property::new(
        "range ignores bound order",
        (range(-5, 5), range(5, -5)),
        |c, &(a, b)| {
            c.assert((-5..5).contains(&a))?;
            c.assert((-5..5).contains(&b))
        },
    ));

    assert_holds(Property::new(
        "float_unit in [0, 1)",
        (float_unit(),),
        |c, &(v,)| c.assert((0.0..1.0).contains(&v)),
    ));

    assert_holds(Property::new(
        "vec_of bounded by size",
        (just_size(), vec_of(int())),
        |c, &(size, ref values)| {
            let bound = size as i64;
            c.assert(values.len() < size.max(1))?;
            c.assert(values.iter().all(|v| (-bound..bound).contains(v)))
        },
    ));

    assert_holds(Property::new(
        "optional shows None",
        (optional(whole_below(3)),),
        |c, &(v,)| {
            c.assert(v.map_or(true, |inner| inner < 3))?;
            c.guard(v.is_none())
        },
    ));
}

/// Property: choice combinators only produce what they were given
pub fn test_choice_generators() {
    let letters = choose(vec!['a', 'b', 'c']).unwrap();
    assert_holds(Property::new("choose membership", (letters,), |c, &(v,)| {
        c.assert(['a', 'b', 'c'].contains(&v))
    }));

    let weighted = frequency(vec![
        (1.0, range(0, 10).boxed()),
        (3.0, range(100, 110).boxed()),
    ])
    .unwrap();
    assert_holds(Property::new("frequency membership", (weighted,), |c, &(v,)| {
        c.classify(v >= 100, "high");
        c.assert((0..10).contains(&v) || (100..110).contains(&v))
    }));

    let either = one_of(vec![range(0, 1).boxed(), range(5, 6).boxed()]).unwrap();
    assert_holds(Property::new("one_of shows both", (either,), |c, &(v,)| {
        c.assert(v == 0 || v == 5)?;
        c.guard(v == 5)
    }));

    assert_holds(Property::new("boolean shows true", (boolean(),), |c, &(v,)| {
        c.guard(v)
    }));
}

/// Property: classify and collect feed the run's statistics
pub fn test_collect() {
    let property = Property::new("collect test", (vec_of(int()),), |c, (values,)| {
        c.classify(values.is_empty(), "empty array");
        c.collect(values.len());
        Ok(())
    });

    let result = Runner::seeded(Config::new(100, 1000), SEED)
        .run(&property)
        .unwrap();
    let stats = result.stats();

    assert!(result.is_pass());
    // Size 0 always yields an empty vector.
    assert!(stats.tag_count("empty array") > 0);

    let distribution = stats.distribution().unwrap();
    assert!((distribution.total() - 1.0).abs() < 1e-9);
    assert!(distribution.probability_of(&"0".to_string()) > 0.0);
    println!("{result}");
}
