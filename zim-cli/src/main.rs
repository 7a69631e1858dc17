// Command-line interface for zim2obsidian
//
// Zim's "Export as Markdown" produces a tree of .md files that Obsidian can open, but with
// Setext headings, Zim checkbox glyphs, @tags and file names that differ from page titles.
// This binary converts such an export in place. The conversion itself lives in zim-babel;
// this crate only parses arguments, layers configuration and reports.
//
// Usage:
//  zim2obsidian [ROOT] [flags]                  - Convert the export in ROOT (default)
//  zim2obsidian convert [ROOT] [flags]          - Same as above (explicit)
//  zim2obsidian links [FILE]                    - Print FILE (or stdin) with wikilinks
//  zim2obsidian rename-extensions [ROOT]        - *.markdown -> *.md
//  zim2obsidian restore-indent [ROOT]           - &emsp;/&nbsp; -> tabs/spaces
//  zim2obsidian substitute-indent [ROOT] --yes  - tabs/spaces -> &emsp;/&nbsp; in Zim pages
//
// ROOT defaults to the current directory.
//
// Configuration:
//
// Settings are read from the embedded defaults, then `zim2obsidian.toml` in ROOT, then the
// file given with --config. Command line flags win over all of them.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::{error, info, warn};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zim_babel::pass::Pass;
use zim_babel::passes::{RestoreIndentPass, WikilinkPass};
use zim_babel::pipeline::{self, PipelineOptions, PipelineSpec};
use zim_babel::Notebook;
use zim_config::{Loader, ZimConfig, CONFIG_FILE_NAME};

const SUBCOMMANDS: &[&str] = &[
    "convert",
    "links",
    "rename-extensions",
    "restore-indent",
    "substitute-indent",
    "help",
];

/// Convert flags and the configuration keys they set.
const FLAG_OVERRIDES: &[(&str, &str, bool)] = &[
    ("backticks", "style.backticks", true),
    ("wikilinks", "links.wikilinks", true),
    ("preserve-at", "style.preserve_at", true),
    ("no-rename", "pages.rename", false),
    ("keep-first-line", "pages.remove_first_line", false),
    ("no-style", "style.enabled", false),
    ("restore-indent", "indent.restore", true),
];

fn root_arg() -> Arg {
    Arg::new("root")
        .help("Root directory of the export (defaults to the current directory)")
        .index(1)
        .value_hint(ValueHint::DirPath)
}

fn flag(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help).action(ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("zim2obsidian")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert a Zim Markdown export into an Obsidian vault")
        .long_about(
            "zim2obsidian post-processes the Markdown export of a Zim notebook in place.\n\n\
            Commands:\n  \
            - convert: Rename pages, convert style and links (default command)\n  \
            - links: Print a single file with links converted to wikilinks\n  \
            - rename-extensions, restore-indent, substitute-indent: helper tools\n\n\
            Examples:\n  \
            zim2obsidian                        # Convert the export in the current directory\n  \
            zim2obsidian export/ -w             # Also convert links to [[wikilinks]]\n  \
            zim2obsidian export/ --json         # Print what was renamed and rewritten",
        )
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a zim2obsidian.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(flag("json", "Print the report as JSON").global(true))
        .arg(
            flag("quiet", "Only log warnings and errors")
                .short('q')
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert the export in place (default command)")
                .long_about(
                    "Convert a Zim Markdown export in place.\n\n\
                    Steps, in order:\n  \
                    1. Rename pages after their first-level heading, fix links to them\n  \
                    2. Remove the title line of the export template\n  \
                    3. Convert headings, rulers, code blocks, checkboxes, highlights, tags\n  \
                    4. Convert Markdown links to wikilinks (with -w)\n  \
                    5. Restore &emsp;/&nbsp; indents (with --restore-indent)",
                )
                .arg(root_arg())
                .arg(flag("backticks", "Code is already fenced with backticks").short('b'))
                .arg(flag("wikilinks", "Convert Markdown links to wikilinks").short('w'))
                .arg(flag("preserve-at", "Keep @tags instead of converting to #tags").short('@'))
                .arg(flag("no-rename", "Keep page file names"))
                .arg(flag("keep-first-line", "Keep the title line of the export template"))
                .arg(flag("no-style", "Skip the style conversion"))
                .arg(flag("restore-indent", "Turn &emsp;/&nbsp; back into tabs and spaces")),
        )
        .subcommand(
            Command::new("links")
                .about("Print a Markdown file with links converted to wikilinks")
                .arg(
                    Arg::new("file")
                        .help("Markdown file, reads stdin if omitted")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("rename-extensions")
                .about("Rename *.markdown files to *.md and fix links to them")
                .arg(root_arg()),
        )
        .subcommand(
            Command::new("restore-indent")
                .about("Turn &emsp; and &nbsp; back into tabs and spaces")
                .arg(root_arg()),
        )
        .subcommand(
            Command::new("substitute-indent")
                .about("Protect indents of Zim source pages before export")
                .long_about(
                    "Replace leading tabs and spaces of every Zim source page (*.txt) with\n\
                    &emsp; and &nbsp;, so that the Markdown export keeps them.\n\n\
                    This modifies the Zim notebook itself, not an export. Back it up first\n\
                    and confirm with --yes.",
                )
                .arg(root_arg().help("Root directory of the Zim notebook"))
                .arg(flag("yes", "Modify the notebook without asking")),
        )
}

/// Inserts `convert` when the first argument is not a subcommand, so that
/// `zim2obsidian`, `zim2obsidian export/` and `zim2obsidian -w` all convert.
fn with_default_subcommand(args: Vec<String>) -> Vec<String> {
    let inject = match args.get(1).map(String::as_str) {
        None => true,
        Some("-h" | "--help" | "-V" | "--version") => false,
        Some(first) => !SUBCOMMANDS.contains(&first),
    };
    if !inject {
        return args;
    }
    let mut new_args = Vec::with_capacity(args.len() + 1);
    new_args.extend(args.first().cloned());
    new_args.push("convert".to_string());
    new_args.extend(args.into_iter().skip(1));
    new_args
}

fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let args = with_default_subcommand(std::env::args().collect());
    let matches = build_cli()
        .try_get_matches_from(&args)
        .unwrap_or_else(|e| e.exit());

    init_logging(matches.get_flag("quiet"));
    let json = matches.get_flag("json");

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let root = root_from(sub_matches);
            let config = load_cli_config(
                &root,
                matches.get_one::<String>("config").map(|s| s.as_str()),
                sub_matches,
            );
            handle_convert_command(&root, &config, json);
        }
        Some(("links", sub_matches)) => {
            let file = sub_matches.get_one::<String>("file").map(|s| s.as_str());
            handle_links_command(file);
        }
        Some(("rename-extensions", sub_matches)) => {
            handle_rename_extensions_command(&root_from(sub_matches), json);
        }
        Some(("restore-indent", sub_matches)) => {
            handle_restore_indent_command(&root_from(sub_matches), json);
        }
        Some(("substitute-indent", sub_matches)) => {
            let root = root_from(sub_matches);
            if !sub_matches.get_flag("yes") {
                eprintln!(
                    "Error: substitute-indent modifies the Zim notebook in \"{}\".",
                    root.display()
                );
                eprintln!("Back it up, then run again with --yes");
                std::process::exit(1);
            }
            handle_substitute_indent_command(&root, json);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn root_from(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<String>("root")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn handle_convert_command(root: &Path, config: &ZimConfig, json: bool) {
    let spec = PipelineSpec::new(root).with_options(PipelineOptions::from(config));
    let report = pipeline::run(spec).unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1);
    });

    info!(
        "Renamed {} page(s), rewrote {} note(s)",
        report.renamed.len(),
        report.rewritten.len()
    );
    if !report.collisions.is_empty() {
        warn!(
            "{} page(s) kept their name because the target already exists",
            report.collisions.len()
        );
    }
    warn_skipped(report.skipped.len());
    if json {
        print_json(&report);
    }
}

fn handle_links_command(file: Option<&str>) {
    let source = match file {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{path}': {e}");
            std::process::exit(1);
        }),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
            buffer
        }
    };
    print!("{}", WikilinkPass.apply(&source));
}

fn handle_rename_extensions_command(root: &Path, json: bool) {
    let notebook = open_notebook(root);
    let report = notebook
        .rename_extensions("markdown", zim_babel::notebook::NOTE_EXTENSION)
        .unwrap_or_else(|e| {
            error!("{e}");
            std::process::exit(1);
        });
    info!("Renamed {} file(s)", report.renamed.len());
    warn_skipped(report.skipped.len());
    if json {
        print_json(&report);
    }
}

fn handle_restore_indent_command(root: &Path, json: bool) {
    let notebook = open_notebook(root);
    let report = notebook.apply_pass(&RestoreIndentPass).unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1);
    });
    info!("Restored indents in {} note(s)", report.rewritten.len());
    warn_skipped(report.skipped.len());
    if json {
        print_json(&report);
    }
}

fn handle_substitute_indent_command(root: &Path, json: bool) {
    let notebook = open_notebook(root);
    let report = notebook.substitute_indent().unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1);
    });
    info!("Substituted indents in {} page(s)", report.rewritten.len());
    warn_skipped(report.skipped.len());
    if json {
        print_json(&report);
    }
}

fn warn_skipped(count: usize) {
    if count > 0 {
        warn!("{count} file(s) could not be converted and were left unchanged");
    }
}

fn open_notebook(root: &Path) -> Notebook {
    Notebook::open(root).unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1);
    })
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(root: &Path, explicit_path: Option<&str>, flags: &ArgMatches) -> ZimConfig {
    build_config(root, explicit_path, flags).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn build_config(
    root: &Path,
    explicit_path: Option<&str>,
    flags: &ArgMatches,
) -> Result<ZimConfig, zim_config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(root.join(CONFIG_FILE_NAME));
    if let Some(path) = explicit_path {
        loader = loader.with_file(path);
    }
    for (flag, key, value) in FLAG_OVERRIDES {
        if flags.get_flag(flag) {
            loader = loader.set_override(key, *value)?;
        }
    }
    loader.build()
}
