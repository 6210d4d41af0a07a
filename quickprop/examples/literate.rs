//! Literate examples: each section declares its properties in a fresh
//! registry, runs them, and reports right underneath with its own listener.

use quickprop::*;

fn main() -> Result<()> {
    println!("quickprop literate examples\n");

    section("Arithmetic", |registry| {
        registry.declare("addition commutes", (int(), int()), |c, &(a, b)| {
            c.assert(a + b == b + a)
        });
        registry.declare("division undoes multiplication", (int(), int()), |c, &(a, b)| {
            c.guard(b != 0)?;
            c.classify(a == 0, "zero numerator");
            c.assert(a * b / b == a)
        });
        Ok(())
    })?;

    section("Vectors", |registry| {
        registry.declare("reverse twice", (vec_of(int()),), |c, (values,)| {
            c.collect(values.len().min(5));
            let mut twice = values.clone();
            twice.reverse();
            twice.reverse();
            c.assert(&twice == values)
        });
        // Wrong on purpose, to show a failing case and its shrunk form.
        registry.declare("reverse is identity", (vec_of(whole_below(10)),), |c, (values,)| {
            let mut reversed = values.clone();
            reversed.reverse();
            c.assert(&reversed == values)
        });
        Ok(())
    })?;

    section("Parsing", |registry| {
        let garbage = choose(["", "x", "1x", "--1", "0x10"])?;
        registry.declare("parse rejects garbage", (garbage,), |c, &(text,)| {
            c.assert_err(&text.parse::<i64>())
        });
        registry.declare("parse reads back", (int(),), |c, &(v,)| {
            let parsed: i64 = v.to_string().parse()?;
            c.assert(parsed == v)
        });
        Ok(())
    })?;

    println!("Full report");
    let mut registry = Registry::new();
    registry.declare("options stay small", (optional(whole_below(100)),), |c, &(v,)| {
        c.classify(v.is_none(), "none");
        c.note_arg(v);
        c.assert(v.map_or(true, |n| n < 90))
    });
    let mut listener = ConsoleListener::new(StdoutSink).with_max_collected(10);
    Runner::new(Config::default()).run_all(&registry, &mut listener, &mut ThreadYield)?;

    Ok(())
}

/// Run one section's properties and print a short report under its title.
fn section<F>(title: &str, declare: F) -> Result<()>
where
    F: FnOnce(&mut Registry) -> Result<()>,
{
    println!("=== {title} ===");

    let mut registry = Registry::new();
    declare(&mut registry)?;

    let mut listener = LiterateListener::default();
    Runner::new(Config::new(100, 1000)).run_all(&registry, &mut listener, &mut Synchronous)?;

    let verdict = if listener.all_passed { "green" } else { "red" };
    println!("section is {verdict}\n");
    Ok(())
}

/// Prints status and counts for every result, and turns the section red as
/// soon as anything does not pass.
struct LiterateListener {
    all_passed: bool,
}

impl Default for LiterateListener {
    fn default() -> Self {
        LiterateListener { all_passed: true }
    }
}

impl Listener for LiterateListener {
    fn note_result(&mut self, result: &TestResult<Rendered>) {
        println!("{}: {}", result.status(), result.name());
        println!("  passes: {}", result.stats().pass);
        println!("  invalid: {}", result.stats().invalid);

        if !result.is_pass() {
            self.all_passed = false;
        }
        if let TestResult::Fail { failed_case, .. } = result {
            println!("  Failed case: {failed_case}");
            if let Some(minimal) = result.minimal_case() {
                println!("  Minimal: {minimal}");
            }
        }
    }

    fn done(&mut self) {
        println!("done.");
    }
}
