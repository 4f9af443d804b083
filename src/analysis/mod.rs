//! Analysis modules.
//!
//! Screening functions are pure; rendering lives in `report`.

pub mod screening;

pub use screening::*;
