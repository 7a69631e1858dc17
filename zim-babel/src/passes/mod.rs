//! Per-document conversion passes.
//!
//! Each pass implements [`crate::pass::Pass`] and rewrites the full text of one note. A
//! conversion runs them in this order, see [`crate::pipeline::PipelineOptions::registry`]:
//!
//! 1. `first-line` - drop the title line of Zim's export template
//! 2. `style`      - headings, rulers, code blocks and inline markup
//! 3. `wikilinks`  - Markdown links to wikilinks (off by default)
//! 4. `indent`     - restore protected indentation (off by default)

pub mod first_line;
pub mod indent;
pub mod inline;
pub mod style;
pub mod wikilinks;

pub use first_line::RemoveFirstLinePass;
pub use indent::{RestoreIndentPass, SubstituteIndentPass};
pub use inline::InlineRules;
pub use style::{StyleOptions, StylePass};
pub use wikilinks::WikilinkPass;
