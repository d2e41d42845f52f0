//! Helper utilities for integration tests.

pub mod assertions;
pub mod index_generator;

pub use assertions::*;
pub use index_generator::*;
