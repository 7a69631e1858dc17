//! Filesystem side of the conversion.
//!
//! A [`Notebook`] is the root directory of a Zim Markdown export. It enumerates the notes below
//! the root, applies passes to them and performs the operations that span more than one file:
//! renaming pages after their headings and renaming `.markdown` files.
//!
//! Every rewrite reads the whole file, transforms it in memory and replaces the original with a
//! temporary sibling in one rename, so a note is never left half written. Notes whose text does
//! not change are not written at all.
//!
//! Hidden files and directories (names starting with `.`, such as `.obsidian`) are skipped.

use crate::common::address;
use crate::error::ConvertError;
use crate::pass::Pass;
use crate::passes::SubstituteIndentPass;
use crate::registry::PassRegistry;
use log::{debug, info, warn};
use regex::Regex;
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::{DirEntry, WalkDir};

/// Extension of the notes Obsidian reads.
pub const NOTE_EXTENSION: &str = "md";

/// Characters that file names cannot contain on common filesystems.
pub const FORBIDDEN_CHARACTERS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// A file that was (or could not be) moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl Rename {
    /// The error describing this rename as a collision.
    pub fn to_error(&self) -> ConvertError {
        ConvertError::RenameCollision {
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }
}

/// A file left untouched because it could not be read, written or moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a renaming run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenameReport {
    /// Files that were renamed.
    pub renamed: Vec<Rename>,
    /// Renames skipped because the target already existed.
    pub collisions: Vec<Rename>,
    /// Notes whose links were adjusted to the new names.
    pub relinked: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
}

/// Outcome of running a transformation over many files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    /// Files whose content changed.
    pub rewritten: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
}

/// Root directory of a Zim Markdown export.
#[derive(Debug, Clone)]
pub struct Notebook {
    root: PathBuf,
}

impl Notebook {
    /// Opens the export rooted at `root`, which must be a directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(ConvertError::Walk {
                path: root,
                message: "not a directory".to_string(),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All notes below the root, sorted by path.
    pub fn documents(&self) -> Result<Vec<PathBuf>, ConvertError> {
        self.files_with_extension(NOTE_EXTENSION)
    }

    /// All files below the root with the given extension (without the dot), sorted by path.
    pub fn files_with_extension(&self, extension: &str) -> Result<Vec<PathBuf>, ConvertError> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|err| ConvertError::Walk {
                path: err.path().unwrap_or(self.root.as_path()).to_path_buf(),
                message: err.to_string(),
            })?;
            if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new(extension))
            {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Reads a note as UTF-8.
    pub fn read(&self, path: &Path) -> Result<String, ConvertError> {
        let bytes = fs::read(path).map_err(|err| ConvertError::io(path, err))?;
        String::from_utf8(bytes).map_err(|_| ConvertError::Encoding(path.to_path_buf()))
    }

    /// Replaces the content of `path` with `text` in a single rename.
    pub fn write(&self, path: &Path, text: &str) -> Result<(), ConvertError> {
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut file = NamedTempFile::new_in(dir).map_err(|err| ConvertError::io(dir, err))?;
        file.write_all(text.as_bytes())
            .map_err(|err| ConvertError::io(file.path(), err))?;
        if let Ok(metadata) = fs::metadata(path) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|err| ConvertError::io(path, err))?;
        }
        file.persist(path)
            .map_err(|err| ConvertError::io(path, err.error))?;
        Ok(())
    }

    /// Applies `transform` to the note at `path`. Returns whether the note changed.
    pub fn rewrite<F>(&self, path: &Path, transform: F) -> Result<bool, ConvertError>
    where
        F: FnOnce(&str) -> String,
    {
        let source = self.read(path)?;
        let converted = transform(&source);
        if converted == source {
            return Ok(false);
        }
        self.write(path, &converted)?;
        Ok(true)
    }

    /// Runs one pass over every note.
    ///
    /// Notes that cannot be read or written are logged, listed as skipped and left alone; the
    /// run goes on with the next note.
    pub fn apply_pass(&self, pass: &dyn Pass) -> Result<RewriteReport, ConvertError> {
        self.rewrite_all(&self.documents()?, |source| pass.apply(source), pass.name())
    }

    /// Runs all passes of `registry` over every note, writing each note once.
    pub fn apply_registry(&self, registry: &PassRegistry) -> Result<RewriteReport, ConvertError> {
        let label = registry.list_passes().join(", ");
        self.rewrite_all(&self.documents()?, |source| registry.apply(source), &label)
    }

    fn rewrite_all<F>(
        &self,
        paths: &[PathBuf],
        transform: F,
        label: &str,
    ) -> Result<RewriteReport, ConvertError>
    where
        F: Fn(&str) -> String,
    {
        let mut report = RewriteReport::default();
        for path in paths {
            info!("Processing \"{}\" ({label}) ...", path.display());
            match self.rewrite(path, &transform) {
                Ok(true) => report.rewritten.push(path.clone()),
                Ok(false) => {}
                Err(err) => skip(path, err, &mut report.skipped)?,
            }
        }
        Ok(report)
    }

    /// Renames every note whose first line is a `# ` heading after that heading, then adjusts
    /// links in all notes that point at a renamed file.
    ///
    /// A rename is skipped, and reported as a collision, if a file with the new name already
    /// exists in the same directory. Notes that cannot be read or moved are listed as skipped.
    pub fn rename_pages(&self) -> Result<RenameReport, ConvertError> {
        let mut report = RenameReport::default();
        let mut names: Vec<(String, String)> = Vec::new();

        for path in self.documents()? {
            let source = match self.read(&path) {
                Ok(source) => source,
                Err(err) => {
                    skip(&path, err, &mut report.skipped)?;
                    continue;
                }
            };
            let Some(new_name) = source.lines().next().and_then(name_from_heading) else {
                continue;
            };
            let Some(old_name) = path.file_name().and_then(OsStr::to_str) else {
                continue;
            };
            if new_name == old_name {
                continue;
            }

            let target = path.with_file_name(&new_name);
            if target.exists() {
                let collision = Rename {
                    from: path.clone(),
                    to: target,
                };
                warn!("{}", collision.to_error());
                report.collisions.push(collision);
                continue;
            }

            info!("Renaming \"{}\" to \"{}\" ...", path.display(), target.display());
            if let Err(err) = fs::rename(&path, &target) {
                skip(&path, ConvertError::io(&path, err), &mut report.skipped)?;
                continue;
            }
            names.push((old_name.to_string(), new_name));
            report.renamed.push(Rename {
                from: path.clone(),
                to: target,
            });
        }

        if names.is_empty() {
            return Ok(report);
        }

        let patterns = names
            .iter()
            .map(|(old, new)| -> Result<_, ConvertError> {
                let pattern = format!(r"\[.+(\]\(.*{}\))", regex::escape(old));
                Ok((Regex::new(&pattern)?, old.as_str(), address::quote_path(new)))
            })
            .collect::<Result<Vec<_>, ConvertError>>()?;

        for path in self.documents()? {
            if report.skipped.iter().any(|skipped| skipped.path == path) {
                continue;
            }
            info!("Adjusting links in \"{}\" ...", path.display());
            match self.rewrite(&path, |source| relink(source, &patterns)) {
                Ok(true) => report.relinked.push(path),
                Ok(false) => {}
                Err(err) => skip(&path, err, &mut report.skipped)?,
            }
        }

        Ok(report)
    }

    /// Renames every `*.{from}` file to `*.{to}` and fixes links ending in `.{from})`.
    pub fn rename_extensions(&self, from: &str, to: &str) -> Result<RenameReport, ConvertError> {
        let mut report = RenameReport::default();
        let old_suffix = format!(".{from})");
        let new_suffix = format!(".{to})");

        for path in self.files_with_extension(from)? {
            let target = path.with_extension(to);
            if target.exists() {
                let collision = Rename {
                    from: path,
                    to: target,
                };
                warn!("{}", collision.to_error());
                report.collisions.push(collision);
                continue;
            }

            info!("Converting \"{}\" ...", path.display());
            let moved = self.read(&path).and_then(|text| {
                self.write(&target, &text.replace(&old_suffix, &new_suffix))?;
                fs::remove_file(&path).map_err(|err| ConvertError::io(&path, err))
            });
            match moved {
                Ok(()) => report.renamed.push(Rename { from: path, to: target }),
                Err(err) => skip(&path, err, &mut report.skipped)?,
            }
        }

        Ok(report)
    }

    /// Protects leading whitespace in Zim source pages (`*.txt`) before they are exported.
    pub fn substitute_indent(&self) -> Result<RewriteReport, ConvertError> {
        let pass = SubstituteIndentPass;
        self.rewrite_all(
            &self.files_with_extension("txt")?,
            |source| pass.apply(source),
            pass.name(),
        )
    }
}

/// Records a per-file failure and lets the caller move on; any other error is returned.
fn skip(path: &Path, err: ConvertError, skipped: &mut Vec<Skipped>) -> Result<(), ConvertError> {
    if !err.is_per_file() {
        return Err(err);
    }
    warn!("Skipping \"{}\": {err}", path.display());
    skipped.push(Skipped {
        path: path.to_path_buf(),
        reason: err.to_string(),
    });
    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Derives a note file name from a `# Heading` line.
pub fn name_from_heading(line: &str) -> Option<String> {
    let title = line.strip_prefix("# ")?.trim();
    let name: String = title
        .chars()
        .filter(|c| !FORBIDDEN_CHARACTERS.contains(c))
        .collect();
    if name.is_empty() {
        return None;
    }
    Some(format!("{name}.{NOTE_EXTENSION}"))
}

/// Points links at renamed notes: `[x](./Old.md)` becomes `[x](New%20Name.md)`.
fn relink(source: &str, patterns: &[(Regex, &str, String)]) -> String {
    let mut text = source.to_string();
    for (pattern, old, new) in patterns {
        let links: Vec<String> = pattern
            .captures_iter(&text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect();
        for old_link in links {
            let new_link = old_link.replace(*old, new).replace("](./", "](");
            debug!("Replacing {old_link} with {new_link}");
            text = text.replace(&old_link, &new_link);
        }
    }
    text
}
