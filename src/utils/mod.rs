//! # Utilities Module
//!
//! Shared formula helpers and the injectable random source.

pub mod math;
pub mod random;

pub use math::*;
pub use random::*;
