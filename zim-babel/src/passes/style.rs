//! Zim to Obsidian Markdown style conversion.
//!
//! Zim's exporter writes Setext headings, `*****` rulers and tab-indented verbatim blocks.
//! This pass rewrites them line by line:
//!
//! | Zim export                 | Obsidian                      |
//! |----------------------------|-------------------------------|
//! | `Title` + `=====`          | `# Title`                     |
//! | `Section` + `-----`        | `## Section`                  |
//! | `*****`                    | `---`                         |
//! | tab-indented lines         | fenced code block             |
//!
//! Everything outside code is run through [`InlineRules`]. With `backticks` enabled, code is
//! taken to be fenced with ```` ``` ```` already and inline code spans are left alone too.
//!
//! An underline only makes sense once the following line is known, so the pass keeps the
//! previous line pending until it has seen the next one.
//!
//! Line breaks are written Unix style: `\r\n` in the input becomes `\n`.

use super::inline::InlineRules;
use crate::pass::Pass;
use log::debug;

const CODE_FENCE: &str = "```";
const INLINE_CODE: &str = "`";

/// Options for [`StylePass`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleOptions {
    /// Code blocks and inline code are already marked with backticks.
    pub backticks: bool,
    /// Do not convert Zim `@tags` to Obsidian `#tags`.
    pub preserve_at: bool,
}

/// Converts headings, rulers, code blocks and inline markup.
#[derive(Debug, Clone, Default)]
pub struct StylePass {
    options: StyleOptions,
}

impl StylePass {
    pub fn new(options: StyleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> StyleOptions {
        self.options
    }
}

impl Pass for StylePass {
    fn name(&self) -> &str {
        "style"
    }

    fn description(&self) -> &str {
        "Convert headings, rulers, code blocks, checkboxes, highlights and tags"
    }

    fn apply(&self, source: &str) -> String {
        let inline = InlineRules::new(self.options.preserve_at);
        let mut lines: Vec<String> = Vec::new();
        let mut previous: Option<String> = None;
        let mut in_code = false;

        let source = source.replace("\r\n", "\n");
        for line in source.split('\n') {
            if is_underline(line, '=') {
                previous = Some(underline(previous.take(), line, "#"));
            } else if is_underline(line, '-') {
                previous = Some(underline(previous.take(), line, "##"));
            } else if is_underline(line, '*') {
                debug!("Converting horizontal ruler");
                lines.extend(previous.take());
                previous = Some("---".to_string());
            } else if self.options.backticks {
                if line.starts_with(CODE_FENCE) {
                    in_code = !in_code;
                }
                lines.extend(previous.take());
                previous = Some(if in_code {
                    line.to_string()
                } else {
                    convert_outside_inline_code(&inline, line)
                });
            } else {
                lines.extend(previous.take());
                let indented = line.starts_with('\t');
                if !in_code && indented {
                    lines.push(CODE_FENCE.to_string());
                    in_code = true;
                } else if in_code && !indented {
                    lines.push(CODE_FENCE.to_string());
                    in_code = false;
                }
                previous = Some(if in_code {
                    line.to_string()
                } else {
                    inline.convert(line)
                });
            }
        }

        lines.extend(previous);
        if in_code && !self.options.backticks {
            lines.push(CODE_FENCE.to_string());
        }
        lines.join("\n")
    }
}

fn is_underline(line: &str, marker: char) -> bool {
    line.starts_with(marker) && line.chars().all(|c| c == marker)
}

/// Turns the pending line into a heading. Without a pending line the underline stays as is.
fn underline(previous: Option<String>, line: &str, prefix: &str) -> String {
    match previous {
        Some(title) => {
            debug!("Converting heading '{title}'");
            format!("{prefix} {title}")
        }
        None => line.to_string(),
    }
}

/// Odd chunks between backticks are inline code and are kept verbatim.
fn convert_outside_inline_code(inline: &InlineRules, line: &str) -> String {
    line.split(INLINE_CODE)
        .enumerate()
        .map(|(i, chunk)| {
            if i % 2 == 1 {
                chunk.to_string()
            } else {
                inline.convert(chunk)
            }
        })
        .collect::<Vec<_>>()
        .join(INLINE_CODE)
}
