//! Zim to Obsidian conversion
//!
//!     This crate post-processes a Markdown export of a Zim notebook so the pages can be used as
//!     an Obsidian vault. It works in place, on the files of the export.
//!
//!     TLDR:
//!         - Every per-document conversion is a [`Pass`]: text in, text out, no I/O.
//!         - Everything that touches the filesystem lives in [`notebook`].
//!         - [`pipeline::run`] strings the two together in the order the conversion needs.
//!
//!     This is a pure lib, that is, it powers the zim2obsidian cli but is shell agnostic: no code
//!     here should suppose a shell environment, be it std printing, env vars etc. Progress is
//!     reported through the `log` facade only.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── pass.rs                 # Pass trait definition
//!     ├── registry.rs             # PassRegistry, ordered
//!     ├── passes
//!     │   ├── first_line.rs       # Drop the export template's title line
//!     │   ├── style.rs            # Headings, rulers, code blocks
//!     │   ├── inline.rs           # Checkboxes, highlights, tags, bracket escaping
//!     │   ├── wikilinks.rs        # Line driver for the link parser
//!     │   ├── indent.rs           # &emsp; / &nbsp; substitutes
//!     │   └── mod.rs
//!     ├── common
//!     │   ├── links.rs            # Markdown link -> wikilink state machine
//!     │   └── address.rs          # URL scheme detection, percent-coding
//!     ├── notebook.rs             # Directory walking, atomic rewrites, renames
//!     ├── pipeline.rs             # High level conversion of a whole export
//!     └── lib.rs
//!
//! Core Algorithm
//!
//!     The one piece of real parsing is the link rewriter (./common/links.rs), a four state
//!     machine that turns `[description](address)` into `[[address|description]]` in a single
//!     pass. It is total over all input: whatever is not a finished link is copied through
//!     unchanged, so a note is never truncated by the conversion.
//!
//!     The remaining passes are line oriented substitutions.
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common                  # Builds exports in temporary directories
//!     ├── links                   # Whole documents (insta) and properties (proptest)
//!     └── notebook                # Whole-export conversions, renames, indent tools
//!
pub mod error;
pub mod notebook;
pub mod pass;
pub mod passes;
pub mod pipeline;
pub mod registry;

pub mod common;

pub use common::links::{to_wikilinks, LinkParser};
pub use error::ConvertError;
pub use notebook::Notebook;
pub use pass::Pass;
pub use pipeline::{PipelineOptions, PipelineReport, PipelineSpec};
pub use registry::PassRegistry;
