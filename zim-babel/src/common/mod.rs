//! Text-level helpers shared by the conversion passes.

pub mod address;
pub mod links;
