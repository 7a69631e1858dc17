//! Pass registry for pass discovery and ordering
//!
//! This module provides a registry for the per-document passes. Unlike a plain lookup table the
//! registry keeps registration order, since that is the order [`PassRegistry::apply`] runs the
//! passes in.

use crate::error::ConvertError;
use crate::pass::Pass;
use crate::pipeline::PipelineOptions;

/// Ordered registry of document passes
///
/// # Examples
///
/// ```ignore
/// let mut registry = PassRegistry::new();
/// registry.register(WikilinkPass);
///
/// let pass = registry.get("wikilinks")?;
/// let text = pass.apply("[Home](Home.md)");
/// ```
#[derive(Default)]
pub struct PassRegistry {
    passes: Vec<Box<dyn Pass>>,
}

impl PassRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        PassRegistry { passes: Vec::new() }
    }

    /// Register a pass
    ///
    /// If a pass with the same name already exists, it is replaced in place and keeps its
    /// position in the run order.
    pub fn register<P: Pass + 'static>(&mut self, pass: P) {
        match self.passes.iter().position(|p| p.name() == pass.name()) {
            Some(index) => self.passes[index] = Box::new(pass),
            None => self.passes.push(Box::new(pass)),
        }
    }

    /// Get a pass by name
    pub fn get(&self, name: &str) -> Result<&dyn Pass, ConvertError> {
        self.passes
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
            .ok_or_else(|| ConvertError::PassNotFound(name.to_string()))
    }

    /// Check if a pass exists
    pub fn has(&self, name: &str) -> bool {
        self.passes.iter().any(|p| p.name() == name)
    }

    /// List pass names in run order
    pub fn list_passes(&self) -> Vec<String> {
        self.passes.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every registered pass over `source`, in order
    pub fn apply(&self, source: &str) -> String {
        self.passes
            .iter()
            .fold(source.to_string(), |text, pass| pass.apply(&text))
    }

    /// Run a single pass by name
    pub fn apply_one(&self, source: &str, name: &str) -> Result<String, ConvertError> {
        Ok(self.get(name)?.apply(source))
    }

    /// Create a registry with the passes a default conversion runs
    pub fn with_defaults() -> Self {
        PipelineOptions::default().registry()
    }
}
