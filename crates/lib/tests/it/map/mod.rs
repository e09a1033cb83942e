//! NestedMap integration tests
//!
//! Tests are organized by area: construction and auto-conversion, item and
//! attribute access, dotted paths, state snapshots, merging and serde.

mod access_tests;
mod helpers;
mod merge_tests;
mod state_tests;
