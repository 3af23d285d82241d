//! Analysis modules.
//!
//! Mass aggregation over engineering-model iterations.

pub mod mass;

pub use mass::*;
