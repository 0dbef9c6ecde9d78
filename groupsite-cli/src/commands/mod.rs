//! Command implementations for the groupsite CLI

pub mod serve;

pub use serve::run_serve;
