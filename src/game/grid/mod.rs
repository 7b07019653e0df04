//! Board geometry.

pub mod grid;

pub use grid::*;
