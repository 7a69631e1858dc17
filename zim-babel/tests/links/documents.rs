use insta::assert_snapshot;
use zim_babel::pass::Pass;
use zim_babel::passes::WikilinkPass;
use zim_babel::LinkParser;

#[test]
fn test_document_with_mixed_links() {
    let source = "\
# Links
See [Home](Home.md) and [page two](./sub/Page%20Two.md).
External: [docs](https://docs.example.org/a%20b) and [mail](mailto:me@example.org).
Namespaced: [Projects:Garden]() and [](Bare.md).
Text with [brackets] (and parens) stays.
Broken: [never closed](Home.md
";
    assert_snapshot!(WikilinkPass.apply(source).trim_end(), @r"
    # Links
    See [[Home.md|Home]] and [[sub/Page Two.md|page two]].
    External: [docs](https://docs.example.org/a%20b) and [mail](mailto:me@example.org).
    Namespaced: [[Projects/Garden]] and [[Bare.md]].
    Text with [brackets] (and parens) stays.
    Broken: [never closed](Home.md
    ");
}

#[test]
fn test_document_without_link_marker_is_untouched() {
    let source = "Already [[Home.md|Home]] and a [note] here.\n";
    assert_eq!(WikilinkPass.apply(source), source);
}

#[test]
fn test_one_parser_for_many_documents() {
    let mut parser = LinkParser::new();
    let documents = ["[a](a.md) [unfinished", "[b](b.md)", "[c]()"];
    let converted: Vec<String> = documents.iter().map(|d| parser.convert(d)).collect();
    assert_eq!(
        converted,
        vec!["[[a.md|a]] [unfinished", "[[b.md|b]]", "[[c]]"]
    );
}
