//! Suite driver and listener contract
//!
//! Results reach the listener once per property in declaration order, the
//! host gets control back between properties, and `done` comes last.

use std::cell::RefCell;
use std::rc::Rc;

use crate::SEED;
use quickprop::*;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Listener for Recorder {
    fn note_result(&mut self, result: &TestResult<Rendered>) {
        self.events.push(format!("{}:{}", result.name(), result.status()));
    }

    fn done(&mut self) {
        self.events.push("done".to_string());
    }
}

fn suite() -> Registry {
    let mut registry = Registry::new();
    registry.declare("sum commutes", (int(), int()), |c, &(a, b)| c.assert(a + b == b + a));
    registry.declare("over-constrained", (int(),), |c, &(v,)| c.guard(v > 0 && v < 1));
    registry.declare("sorted stays sorted", (vec_of(int()),), |c, (values,)| {
        c.classify(values.len() > 1, "non-trivial");
        c.assert(values.windows(2).all(|pair| pair[0] <= pair[1]))
    });
    registry.declare("reverse is identity", (vec_of(whole_below(10)),), |c, (values,)| {
        let mut reversed = values.clone();
        reversed.reverse();
        c.collect(values.len());
        c.assert(&reversed == values)
    });
    registry
}

pub fn test_listener_order() {
    let registry = suite();
    let mut listener = Recorder::default();
    let yielded = Rc::new(RefCell::new(0));
    let counter = yielded.clone();
    let mut scheduler = move || *counter.borrow_mut() += 1;

    let summary = Runner::seeded(Config::default(), SEED)
        .run_all(&registry, &mut listener, &mut scheduler)
        .unwrap();

    assert_eq!(
        listener.events,
        vec![
            "sum commutes:pass",
            "over-constrained:invalid",
            "sorted stays sorted:fail",
            "reverse is identity:fail",
            "done",
        ]
    );
    assert_eq!(*yielded.borrow(), registry.len() - 1);
    assert_eq!(
        summary,
        Summary {
            passed: 1,
            invalid: 1,
            failed: 2
        }
    );
}

pub fn test_console_report() {
    let mut registry = Registry::new();
    registry.declare("small sums", (whole_below(50), whole_below(50)), |c, &(a, b)| {
        c.note_arg(a + b);
        c.assert(a + b < 60)
    });

    let mut listener = ConsoleListener::new(Transcript::new()).with_max_collected(3);
    Runner::seeded(Config::default(), SEED)
        .run_all(&registry, &mut listener, &mut Synchronous)
        .unwrap();
    let transcript = listener.into_sink();

    assert_eq!(transcript.on(Channel::Warn), vec!["fail: small sums"]);
    let logged = transcript.on(Channel::Log);
    assert!(logged[0].starts_with("small sums: "));
    assert_eq!(logged[1], "Failed case:");
    assert!(logged[3].starts_with("noted: "));
    assert_eq!(logged.last(), Some(&"done."));
}

pub fn test_body_error_propagates() {
    let mut registry = Registry::new();
    registry.declare("parses digits", (whole_below(1000),), |c, &(v,)| {
        let digit: u8 = format!("{}", v * 10).parse()?;
        c.assert(digit < 255)
    });
    registry.declare("never reached", (), |_, _| Ok(()));

    let mut listener = Recorder::default();
    let outcome = Runner::seeded(Config::default(), SEED).run_all(
        &registry,
        &mut listener,
        &mut ThreadYield,
    );

    match outcome {
        Err(QuickpropError::Body { property, .. }) => assert_eq!(property, "parses digits"),
        other => panic!("Expected the body error to escape, got: {other:?}"),
    }
    assert!(listener.events.is_empty());
}
