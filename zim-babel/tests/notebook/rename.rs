use crate::common::{export, read};
use zim_babel::notebook::Rename;
use zim_babel::Notebook;

#[test]
fn test_rename_collision_keeps_both_files() {
    let dir = export(&[
        ("Home.md", "# Home\nthe real home\n"),
        ("Junk.md", "# Home\nan impostor\n"),
        ("Index.md", "# Index\n[junk](./Junk.md)\n"),
    ]);
    let notebook = Notebook::open(dir.path()).unwrap();

    let report = notebook.rename_pages().unwrap();

    assert!(report.renamed.is_empty());
    assert_eq!(
        report.collisions,
        vec![Rename {
            from: dir.path().join("Junk.md"),
            to: dir.path().join("Home.md"),
        }]
    );
    assert!(report.relinked.is_empty());
    assert_eq!(read(dir.path(), "Home.md"), "# Home\nthe real home\n");
    assert_eq!(read(dir.path(), "Junk.md"), "# Home\nan impostor\n");
    assert_eq!(read(dir.path(), "Index.md"), "# Index\n[junk](./Junk.md)\n");
}

#[test]
fn test_rename_strips_forbidden_characters_and_relinks() {
    let dir = export(&[
        ("Plans.md", "# Plans: 2024/25?\n"),
        ("Index.md", "# Index\nSee [plans](./Plans.md) and [other](./Other.md)\n"),
    ]);
    let notebook = Notebook::open(dir.path()).unwrap();

    let report = notebook.rename_pages().unwrap();

    assert_eq!(report.renamed.len(), 1);
    assert!(dir.path().join("Plans 202425.md").exists());
    assert_eq!(
        read(dir.path(), "Index.md"),
        "# Index\nSee [plans](Plans%20202425.md) and [other](./Other.md)\n"
    );
}

#[test]
fn test_pages_without_heading_keep_their_name() {
    let dir = export(&[("Notes.md", "Just text\n"), ("Empty.md", "")]);
    let notebook = Notebook::open(dir.path()).unwrap();

    let report = notebook.rename_pages().unwrap();

    assert!(report.renamed.is_empty());
    assert!(report.collisions.is_empty());
    assert!(dir.path().join("Notes.md").exists());
    assert!(dir.path().join("Empty.md").exists());
}

#[test]
fn test_rename_extensions() {
    let dir = export(&[
        ("Home.markdown", "# Home\n[Sub](./Home/Sub.markdown)\n"),
        ("Home/Sub.markdown", "# Sub\n"),
        ("Clash.markdown", "old\n"),
        ("Clash.md", "new\n"),
    ]);
    let notebook = Notebook::open(dir.path()).unwrap();

    let report = notebook.rename_extensions("markdown", "md").unwrap();

    assert_eq!(report.renamed.len(), 2);
    assert_eq!(report.collisions.len(), 1);
    assert_eq!(
        read(dir.path(), "Home.md"),
        "# Home\n[Sub](./Home/Sub.md)\n"
    );
    assert_eq!(read(dir.path(), "Home/Sub.md"), "# Sub\n");
    assert!(!dir.path().join("Home.markdown").exists());
    assert_eq!(read(dir.path(), "Clash.markdown"), "old\n");
    assert_eq!(read(dir.path(), "Clash.md"), "new\n");
}
