//! CLI command handling

pub mod out;

pub use out::*;
