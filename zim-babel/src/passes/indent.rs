//! Indentation substitutes.
//!
//! Zim's Markdown exporter drops leading tabs and spaces. [`SubstituteIndentPass`] runs on the
//! Zim notebook *before* export and protects indentation with HTML entities; after export,
//! [`RestoreIndentPass`] turns the entities back into whitespace.

use crate::pass::Pass;

pub const TAB_SUBSTITUTE: &str = "&emsp;";
pub const SPACE_SUBSTITUTE: &str = "&nbsp;";

/// First line of every page in a Zim notebook.
pub const ZIM_HEADER: &str = "Content-Type: text/x-zim-wiki";

/// Replaces `&emsp;` with tabs and `&nbsp;` with spaces, wherever they occur.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestoreIndentPass;

impl Pass for RestoreIndentPass {
    fn name(&self) -> &str {
        "indent"
    }

    fn description(&self) -> &str {
        "Restore tabs and spaces from &emsp; and &nbsp; substitutes"
    }

    fn apply(&self, source: &str) -> String {
        source
            .replace(TAB_SUBSTITUTE, "\t")
            .replace(SPACE_SUBSTITUTE, " ")
    }
}

/// Replaces leading tabs and spaces of every line in a Zim source page.
///
/// Text that does not start with [`ZIM_HEADER`] is not a Zim page and is returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstituteIndentPass;

impl SubstituteIndentPass {
    pub fn is_zim_page(source: &str) -> bool {
        source.starts_with(ZIM_HEADER)
    }
}

impl Pass for SubstituteIndentPass {
    fn name(&self) -> &str {
        "substitute-indent"
    }

    fn description(&self) -> &str {
        "Protect leading tabs and spaces of Zim source pages before export"
    }

    fn apply(&self, source: &str) -> String {
        if !Self::is_zim_page(source) {
            return source.to_string();
        }
        let mut out = String::with_capacity(source.len());
        for line in source.split_inclusive('\n') {
            let body = line.trim_start_matches(|c: char| c == '\t' || c == ' ');
            for c in line[..line.len() - body.len()].chars() {
                out.push_str(if c == '\t' {
                    TAB_SUBSTITUTE
                } else {
                    SPACE_SUBSTITUTE
                });
            }
            out.push_str(body);
        }
        out
    }
}
