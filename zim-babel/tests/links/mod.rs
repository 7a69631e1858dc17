//! Link rewriter tests
//!
//! Whole-document conversions are checked with inline snapshots, general guarantees of the
//! state machine with property tests.

mod documents;
mod properties;
