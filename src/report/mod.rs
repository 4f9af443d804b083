//! Report rendering for the terminal.

pub mod generator;

pub use generator::*;
