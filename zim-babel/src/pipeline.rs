//! Notebook conversion pipeline.
//!
//! Provides a high-level API for converting a whole Zim export in place. This module bridges
//! the pass registry and the [`Notebook`] file operations, running the steps in the order the
//! conversion depends on:
//!
//! 1. rename pages after their first heading (needs the title line still present)
//! 2. per-document passes (first-line, style, wikilinks, indent), written once per note
//!
//! For more control, use [`Notebook`] and [`PassRegistry`] directly.

use crate::error::ConvertError;
use crate::notebook::{Notebook, Rename, Skipped};
use crate::passes::{
    RemoveFirstLinePass, RestoreIndentPass, StyleOptions, StylePass, WikilinkPass,
};
use crate::registry::PassRegistry;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Which steps of the conversion to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Rename pages according to their top first-level heading.
    pub rename_pages: bool,
    /// Remove the heading inserted by Zim's default export template.
    pub remove_first_line: bool,
    /// Convert Markdown formatting to Obsidian style; `None` skips the step.
    pub style: Option<StyleOptions>,
    /// Convert Markdown links to wikilinks.
    pub wikilinks: bool,
    /// Turn `&emsp;`/`&nbsp;` substitutes back into whitespace.
    pub restore_indent: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            rename_pages: true,
            remove_first_line: true,
            style: Some(StyleOptions::default()),
            wikilinks: false,
            restore_indent: false,
        }
    }
}

impl PipelineOptions {
    /// Builds the registry of per-document passes enabled by these options.
    pub fn registry(&self) -> PassRegistry {
        let mut registry = PassRegistry::new();
        if self.remove_first_line {
            registry.register(RemoveFirstLinePass);
        }
        if let Some(style) = self.style {
            registry.register(StylePass::new(style));
        }
        if self.wikilinks {
            registry.register(WikilinkPass);
        }
        if self.restore_indent {
            registry.register(RestoreIndentPass);
        }
        registry
    }
}

/// Specifies which notebook to convert and how.
///
/// ```ignore
/// let spec = PipelineSpec::new("export/")
///     .with_options(PipelineOptions { wikilinks: true, ..Default::default() });
/// let report = run(spec)?;
/// ```
#[derive(Debug, Clone)]
pub struct PipelineSpec {
    /// Root directory of the Markdown export.
    pub root: PathBuf,
    pub options: PipelineOptions,
}

impl PipelineSpec {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Pages renamed after their heading.
    pub renamed: Vec<Rename>,
    /// Renames skipped because the target existed.
    pub collisions: Vec<Rename>,
    /// Notes whose links were pointed at renamed pages.
    pub relinked: Vec<PathBuf>,
    /// Notes changed by the per-document passes.
    pub rewritten: Vec<PathBuf>,
    /// Files left as they were because they could not be read, written or moved.
    pub skipped: Vec<Skipped>,
}

/// Converts the notebook described by `spec` in place.
///
/// # Errors
///
/// Returns [`ConvertError`] if the root is not a directory or cannot be walked. Naming
/// collisions and notes that cannot be read or written are not errors; they are logged, listed
/// in the report and the run goes on with the remaining notes.
pub fn run(spec: PipelineSpec) -> Result<PipelineReport, ConvertError> {
    let notebook = Notebook::open(&spec.root)?;
    info!(
        "*** Convert Zim export in \"{}\" to Obsidian ***",
        notebook.root().display()
    );

    let mut report = PipelineReport::default();

    if spec.options.rename_pages {
        let renames = notebook.rename_pages()?;
        report.renamed = renames.renamed;
        report.collisions = renames.collisions;
        report.relinked = renames.relinked;
        report.skipped = renames.skipped;
    }

    let registry = spec.options.registry();
    if !registry.is_empty() {
        let rewrites = notebook.apply_registry(&registry)?;
        report.rewritten = rewrites.rewritten;
        for skipped in rewrites.skipped {
            if !report.skipped.contains(&skipped) {
                report.skipped.push(skipped);
            }
        }
    }

    info!("Done.");
    Ok(report)
}
