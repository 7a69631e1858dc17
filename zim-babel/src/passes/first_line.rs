//! Removal of the title line added by Zim's default export template.

use crate::pass::Pass;

/// Drops the first line of a document, terminator included.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveFirstLinePass;

impl Pass for RemoveFirstLinePass {
    fn name(&self) -> &str {
        "first-line"
    }

    fn description(&self) -> &str {
        "Remove the page title inserted by the Zim export template"
    }

    fn apply(&self, source: &str) -> String {
        match source.find('\n') {
            Some(end) => source[end + 1..].to_string(),
            None => String::new(),
        }
    }
}
