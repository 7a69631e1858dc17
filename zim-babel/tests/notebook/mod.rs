//! Whole-export tests
//!
//! Each test builds a small Zim export in a temporary directory and converts it in place.

mod convert;
mod rename;
mod tools;
