use crate::common::{export, read};
use zim_babel::pass::Pass;
use zim_babel::passes::RestoreIndentPass;
use zim_babel::Notebook;

const ZIM_PAGE: &str = "\
Content-Type: text/x-zim-wiki
Wiki-Format: zim 0.6

====== Shopping ======
\tfruit
  \tapples
";

#[test]
fn test_substitute_indent_only_touches_zim_pages() {
    let dir = export(&[
        ("Shopping.txt", ZIM_PAGE),
        ("readme.txt", "\tnot a zim page\n"),
        ("Home.md", "\tmarkdown\n"),
    ]);
    let notebook = Notebook::open(dir.path()).unwrap();

    let report = notebook.substitute_indent().unwrap();

    assert_eq!(report.rewritten, vec![dir.path().join("Shopping.txt")]);
    assert!(report.skipped.is_empty());
    assert_eq!(
        read(dir.path(), "Shopping.txt"),
        "Content-Type: text/x-zim-wiki\nWiki-Format: zim 0.6\n\n====== Shopping ======\n&emsp;fruit\n&nbsp;&nbsp;&emsp;apples\n"
    );
    assert_eq!(read(dir.path(), "readme.txt"), "\tnot a zim page\n");
    assert_eq!(read(dir.path(), "Home.md"), "\tmarkdown\n");
}

#[test]
fn test_substitute_then_restore_gives_back_whitespace() {
    let dir = export(&[("Shopping.txt", ZIM_PAGE)]);
    let notebook = Notebook::open(dir.path()).unwrap();

    notebook.substitute_indent().unwrap();
    let restored = RestoreIndentPass.apply(&read(dir.path(), "Shopping.txt"));

    assert_eq!(restored, ZIM_PAGE);
}

#[test]
fn test_invalid_note_is_skipped_by_substitute_indent() {
    let dir = export(&[("Shopping.txt", ZIM_PAGE)]);
    std::fs::write(dir.path().join("Broken.txt"), [0xff, 0xfe, b'\n']).unwrap();
    let notebook = Notebook::open(dir.path()).unwrap();

    let report = notebook.substitute_indent().unwrap();

    assert_eq!(report.rewritten, vec![dir.path().join("Shopping.txt")]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, dir.path().join("Broken.txt"));
}

#[test]
fn test_apply_pass_writes_only_changed_notes() {
    let dir = export(&[("a.md", "&emsp;a\n"), ("b.md", "b\n")]);
    let notebook = Notebook::open(dir.path()).unwrap();

    let report = notebook.apply_pass(&RestoreIndentPass).unwrap();

    assert_eq!(report.rewritten, vec![dir.path().join("a.md")]);
    assert_eq!(read(dir.path(), "a.md"), "\ta\n");
}
