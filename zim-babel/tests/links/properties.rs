use proptest::prelude::*;
use zim_babel::{to_wikilinks, LinkParser};

proptest! {
    #[test]
    fn text_without_delimiters_is_unchanged(text in "[^\\[\\]()]*") {
        prop_assert_eq!(to_wikilinks(&text), text);
    }

    #[test]
    fn text_without_opening_bracket_is_unchanged(text in "[^\\[]*") {
        prop_assert_eq!(to_wikilinks(&text), text);
    }

    #[test]
    fn external_links_are_unchanged(
        description in "[a-zA-Z0-9 ]{0,12}",
        scheme in "(http|https|ftp|mailto)",
        rest in "[a-z0-9./%-]{1,24}",
    ) {
        let link = format!("[{description}]({scheme}://{rest})");
        prop_assert_eq!(to_wikilinks(&link), link);
    }

    #[test]
    fn feeding_in_chunks_matches_single_conversion(
        text in "[a-z:./% \\[\\]()]{0,64}",
        split in 0usize..64,
    ) {
        let chars: Vec<char> = text.chars().collect();
        let split = split.min(chars.len());
        let head: String = chars[..split].iter().collect();
        let tail: String = chars[split..].iter().collect();

        let mut parser = LinkParser::new();
        parser.feed(&head);
        parser.feed(&tail);
        prop_assert_eq!(parser.finish(), to_wikilinks(&text));
    }

    #[test]
    fn unfinished_links_are_preserved(
        description in "[a-z ]{0,12}",
        address in "[a-z./]{0,12}",
    ) {
        let open = format!("[{description}");
        prop_assert_eq!(to_wikilinks(&open), open.clone());
        let closed = format!("[{description}]");
        prop_assert_eq!(to_wikilinks(&closed), closed.clone());
        let pending = format!("[{description}]({address}");
        prop_assert_eq!(to_wikilinks(&pending), pending.clone());
    }

    #[test]
    fn internal_links_become_wikilinks(
        description in "[a-zA-Z ]{1,12}",
        address in "[a-zA-Z]{1,12}\\.md",
    ) {
        let link = format!("[{description}]({address})");
        prop_assert_eq!(to_wikilinks(&link), format!("[[{address}|{description}]]"));
    }
}
