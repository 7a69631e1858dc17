use crate::common::{export, read};
use insta::assert_snapshot;
use zim_babel::passes::StyleOptions;
use zim_babel::pipeline::{run, PipelineOptions, PipelineSpec};

const HOME: &str = "\
# Home
Home
====
Created Monday 2 January 2023

See [Journal](./Home/Journal.md) and [the web](https://zim-wiki.org).
☐ water plants
* ☑ buy seeds
__important__ for @garden
[maybe] later
*****
";

const JOURNAL: &str = "\
# Garden Journal
Garden Journal
==============
Back to [Home](../Home.md)
";

fn with_wikilinks() -> PipelineOptions {
    PipelineOptions {
        wikilinks: true,
        ..Default::default()
    }
}

#[test]
fn test_convert_export_to_obsidian() {
    let dir = export(&[("Home.md", HOME), ("Home/Journal.md", JOURNAL)]);

    let report = run(PipelineSpec::new(dir.path()).with_options(with_wikilinks())).unwrap();

    assert_eq!(report.renamed.len(), 1);
    assert_eq!(report.renamed[0].to, dir.path().join("Home/Garden Journal.md"));
    assert_eq!(report.relinked, vec![dir.path().join("Home.md")]);
    assert!(!dir.path().join("Home/Journal.md").exists());

    assert_snapshot!(read(dir.path(), "Home.md").trim_end(), @r"
    # Home
    Created Monday 2 January 2023

    See [[Home/Garden Journal.md|Journal]] and [the web](https://zim-wiki.org).
    - [ ] water plants
    - [x] buy seeds
    ==important== for #garden
    \[maybe] later
    ---
    ");
    assert_eq!(
        read(dir.path(), "Home/Garden Journal.md"),
        "# Garden Journal\nBack to [[../Home.md|Home]]\n"
    );
}

#[test]
fn test_default_options_keep_markdown_links() {
    let dir = export(&[("Home.md", HOME), ("Home/Journal.md", JOURNAL)]);

    run(PipelineSpec::new(dir.path())).unwrap();

    let home = read(dir.path(), "Home.md");
    assert!(home.contains("See [Journal](Home/Garden%20Journal.md) and"));
    assert!(!home.contains("[["));
}

#[test]
fn test_preserve_at_and_keep_first_line() {
    let dir = export(&[("Tags.md", "# Tags\n@home @work\n")]);
    let options = PipelineOptions {
        rename_pages: false,
        remove_first_line: false,
        style: Some(StyleOptions {
            preserve_at: true,
            ..Default::default()
        }),
        ..Default::default()
    };

    let report = run(PipelineSpec::new(dir.path()).with_options(options)).unwrap();

    assert!(report.rewritten.is_empty());
    assert_eq!(read(dir.path(), "Tags.md"), "# Tags\n@home @work\n");
}

#[test]
fn test_tab_indented_code_is_fenced() {
    let dir = export(&[("Code.md", "# Code\nRun:\n\tcargo run\n\tcargo test\nDone\n")]);

    run(PipelineSpec::new(dir.path())).unwrap();

    assert_eq!(
        read(dir.path(), "Code.md"),
        "Run:\n```\n\tcargo run\n\tcargo test\n```\nDone\n"
    );
}

#[test]
fn test_backticks_mode_leaves_code_alone() {
    let source = "# Code\n```\n@not_a_tag __x__\n```\nUse `@x` or @y\n";
    let dir = export(&[("Code.md", source)]);
    let options = PipelineOptions {
        style: Some(StyleOptions {
            backticks: true,
            ..Default::default()
        }),
        ..Default::default()
    };

    run(PipelineSpec::new(dir.path()).with_options(options)).unwrap();

    assert_eq!(
        read(dir.path(), "Code.md"),
        "```\n@not_a_tag __x__\n```\nUse `@x` or #y\n"
    );
}

#[test]
fn test_restore_indent() {
    let dir = export(&[("List.md", "# List\n&emsp;item\n&nbsp;&nbsp;sub\n")]);
    let options = PipelineOptions {
        style: None,
        restore_indent: true,
        ..Default::default()
    };

    run(PipelineSpec::new(dir.path()).with_options(options)).unwrap();

    assert_eq!(read(dir.path(), "List.md"), "\titem\n  sub\n");
}

#[test]
fn test_second_run_changes_nothing_with_wikilinks() {
    let dir = export(&[("Home.md", "# Home\n[Home](Home.md)\n")]);
    let options = PipelineOptions {
        rename_pages: false,
        remove_first_line: false,
        style: None,
        wikilinks: true,
        restore_indent: false,
    };

    let first = run(PipelineSpec::new(dir.path()).with_options(options)).unwrap();
    let second = run(PipelineSpec::new(dir.path()).with_options(options)).unwrap();

    assert_eq!(first.rewritten.len(), 1);
    assert!(second.rewritten.is_empty());
    assert_eq!(read(dir.path(), "Home.md"), "# Home\n[[Home.md|Home]]\n");
}
