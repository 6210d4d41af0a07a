//! Core functionality for quickprop property-based testing.
//!
//! A property pairs a name and a tuple of generators with a test body. The
//! runner feeds the body freshly generated arguments at a growing size until
//! enough trials pass, too many are discarded, or one fails. A failing
//! argument tuple is then shrunk by trying every combination of smaller
//! candidates its generators propose.
//!
//! ```
//! use quickprop_core::*;
//!
//! let property = Property::new("positive is negative", (int(),), |c, &(v,)| {
//!     c.guard(v > 0)?;
//!     c.assert(v < 0)
//! });
//!
//! let result = Runner::seeded(Config::default(), 42).run(&property).unwrap();
//! assert!(result.is_fail());
//! assert!(result.minimal_case().unwrap().0 > 0);
//! ```

pub mod case;
pub mod data;
pub mod distribution;
pub mod error;
pub mod gen;
pub mod listener;
pub mod property;
pub mod registry;
pub mod runner;
pub mod shrink;

// Re-export the main types
pub use case::*;
pub use data::*;
pub use distribution::*;
pub use error::*;
pub use gen::*;
pub use listener::*;
pub use property::*;
pub use registry::*;
pub use runner::*;
pub use shrink::*;
