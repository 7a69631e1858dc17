//! Pass trait definition
//!
//! This module defines the core Pass trait that all per-document conversions implement.
//! A pass takes the full text of one note and returns its rewritten text; passes never touch
//! the filesystem, which is left to [`crate::notebook`].

/// Trait for document passes
///
/// Implementors rewrite the text of a single document. Passes are total: malformed input is
/// copied through rather than rejected.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Pass for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn apply(&self, source: &str) -> String {
///         source.to_uppercase()
///     }
/// }
/// ```
pub trait Pass: Send + Sync {
    /// The name of this pass (e.g., "wikilinks", "style")
    fn name(&self) -> &str;

    /// Optional description of this pass
    fn description(&self) -> &str {
        ""
    }

    /// Rewrite the text of one document
    fn apply(&self, source: &str) -> String;
}
