//! Document driver for [`LinkParser`].

use crate::common::links::LinkParser;
use crate::pass::Pass;

/// Marker that must be present on a line for it to contain an inline link.
const LINK_MARKER: &str = "](";

/// Converts Markdown links to wikilinks, one line at a time.
///
/// Lines without `](` cannot hold a link and are copied without running the parser. This also
/// makes the pass a no-op on text that already uses wikilinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WikilinkPass;

impl Pass for WikilinkPass {
    fn name(&self) -> &str {
        "wikilinks"
    }

    fn description(&self) -> &str {
        "Convert Markdown links to wikilinks"
    }

    fn apply(&self, source: &str) -> String {
        let mut parser = LinkParser::new();
        let mut out = String::with_capacity(source.len());
        for line in source.split_inclusive('\n') {
            if line.contains(LINK_MARKER) {
                out.push_str(&parser.convert(line));
            } else {
                out.push_str(line);
            }
        }
        out
    }
}
