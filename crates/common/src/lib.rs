//! Shared runtime helpers for the submission service crates.

pub mod env;
pub mod utils;
