//! quickprop property-based testing library.
//!
//! This is the main entry point for quickprop. Everything lives in
//! `quickprop-core` and is re-exported here.

pub use quickprop_core::*;
