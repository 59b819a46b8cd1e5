//! Storage abstractions for service layer
//!
//! Whole-collection JSON persistence: every operation reads the file, and every
//! write re-serializes the full sequence.

pub mod json_vec_store;
