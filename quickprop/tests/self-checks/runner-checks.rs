//! Runner accounting properties
//!
//! Each property here runs an inner property with a configuration drawn by
//! the outer one and checks the counts it comes back with.

use crate::assert_holds;
use quickprop::*;

/// Property: a body that never asserts or guards passes exactly max_pass times
pub fn test_unconditional_pass() {
    assert_holds(Property::new("unconditional pass", (range(1, 60),), |c, &(n,)| {
        let inner = Property::new("anything goes", (int(), vec_of(int())), |_, _| Ok(()));
        let result = Runner::seeded(Config::new(n as usize, 10), n as u64).run(&inner)?;

        c.assert(result.is_pass())?;
        c.assert(result.stats().pass == n as usize)?;
        c.assert(result.stats().invalid == 0)
    }));
}

/// Property: a body that always guards false uses up exactly max_invalid
pub fn test_unconditional_guard() {
    assert_holds(Property::new("unconditional guard", (range(1, 200),), |c, &(m,)| {
        let inner = Property::new("nothing goes", (int(),), |c, _| c.guard(false));
        let result = Runner::seeded(Config::new(10, m as usize), m as u64).run(&inner)?;

        c.assert(result.is_invalid())?;
        c.assert(result.stats().pass == 0)?;
        c.assert(result.stats().invalid == m as usize)
    }));
}

/// Property: the first failing trial ends the run with its own arguments
pub fn test_failure_stops_early() {
    assert_holds(Property::new("failure stops early", (range(1, 20),), |c, &(k,)| {
        let limit = k as usize;
        let inner = Property::new("size below limit", (just_size(),), move |c, &(size,)| {
            c.assert(size < limit)
        });
        let result = Runner::seeded(Config::new(100, 100), k as u64).run(&inner)?;

        c.note_arg(&result);
        c.assert(result.is_fail())?;
        c.assert(result.stats().pass == limit)?;
        c.assert(result.minimal_case() == Some(&(limit,)))
    }));
}
