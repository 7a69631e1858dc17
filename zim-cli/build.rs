use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn root_arg() -> Arg {
    Arg::new("root")
        .help("Root directory of the export")
        .index(1)
        .value_hint(ValueHint::DirPath)
}

fn flag(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help).action(ArgAction::SetTrue)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("zim2obsidian")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert a Zim Markdown export into an Obsidian vault")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
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
                .arg(root_arg())
                .arg(flag("backticks", "Code is fenced with backticks").short('b'))
                .arg(flag("wikilinks", "Convert links to wikilinks").short('w'))
                .arg(flag("preserve-at", "Keep @tags as they are").short('@'))
                .arg(flag("no-rename", "Keep page file names"))
                .arg(flag("keep-first-line", "Keep the title line"))
                .arg(flag("no-style", "Skip the style conversion"))
                .arg(flag("restore-indent", "Restore &emsp;/&nbsp; indents")),
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
                .about("Rename *.markdown files to *.md")
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
                .arg(root_arg().help("Root directory of the Zim notebook"))
                .arg(flag("yes", "Modify the notebook without asking")),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "zim2obsidian", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "zim2obsidian", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "zim2obsidian", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
