//! Conversion of inline Markdown links into wikilinks.
//!
//! Zim exports links between pages as ordinary inline links, `[description](address)`. Obsidian
//! expects internal references as wikilinks instead:
//!
//! | Markdown                    | Wikilink                    | Notes                               |
//! |-----------------------------|-----------------------------|-------------------------------------|
//! | `[Home](Home.md)`           | `[[Home.md\|Home]]`         | description kept after the pipe    |
//! | `[](Home.md)`               | `[[Home.md]]`               | no description, no pipe             |
//! | `[text](./rel/page.md)`     | `[[rel/page.md\|text]]`     | one leading `./` is dropped         |
//! | `[x](a%20b.md)`             | `[[a b.md\|x]]`             | the address is percent-decoded      |
//! | `[Home]()`                  | `[[Home]]`                  | address taken from the description  |
//! | `[A:B]()`                   | `[[A/B]]`                   | Zim namespaces become folders       |
//! | `[site](https://x.org)`     | `[site](https://x.org)`     | external URLs are left alone        |
//!
//! The `:` to `/` substitution for addressless links follows Zim's page naming, where `A:B` is
//! the page `B` inside the namespace `A`. It is not general Markdown semantics.
//!
//! # Why a state machine
//!
//!     Regular expressions could not tell a description followed by its address apart from
//!     unrelated bracket and parenthesis pairs on the same line, and broke on descriptions that
//!     contain brackets. The parser below is a single linear pass over the characters with four
//!     states, so every input has exactly one, deterministic rewriting.
//!
//!     The parser is total: anything that turns out not to be a link is copied through, and
//!     [`LinkParser::close`] flushes an unfinished link back into the output verbatim.

use super::address;

/// Position of the parser relative to link syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Ordinary text.
    #[default]
    Body,
    /// After `[`, reading the description.
    Desc,
    /// After `]`, expecting `(`.
    Link,
    /// After `(`, reading the address.
    Address,
}

/// Role of a single input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Data(char),
}

impl CharClass {
    fn of(c: char) -> Self {
        match c {
            '[' => CharClass::OpenBracket,
            ']' => CharClass::CloseBracket,
            '(' => CharClass::OpenParen,
            ')' => CharClass::CloseParen,
            other => CharClass::Data(other),
        }
    }

    fn as_char(self) -> char {
        match self {
            CharClass::OpenBracket => '[',
            CharClass::CloseBracket => ']',
            CharClass::OpenParen => '(',
            CharClass::CloseParen => ')',
            CharClass::Data(c) => c,
        }
    }
}

/// Streaming rewriter for Markdown links.
///
/// The parser owns all of its state, so a single instance can be reused for any number of
/// documents as long as [`reset`](Self::reset) (or [`convert`](Self::convert)) runs between them.
///
/// ```ignore
/// let mut parser = LinkParser::new();
/// assert_eq!(parser.convert("see [Home](Home.md)"), "see [[Home.md|Home]]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkParser {
    state: State,
    description: String,
    address: String,
    result: String,
}

impl LinkParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, mostly useful to callers feeding input in chunks.
    pub fn state(&self) -> State {
        self.state
    }

    /// Discards all buffered and produced text and returns to [`State::Body`].
    pub fn reset(&mut self) {
        self.result.clear();
        self.description.clear();
        self.address.clear();
        self.state = State::Body;
    }

    /// Feeds more text to the parser. State carries over between calls.
    pub fn feed(&mut self, text: &str) {
        for c in text.chars() {
            self.step(CharClass::of(c));
        }
    }

    /// Appends any unfinished link syntax to the output unchanged and clears the buffers.
    ///
    /// A link is only rewritten once its closing `)` was seen; everything before that point is
    /// restored literally, delimiters included.
    pub fn close(&mut self) {
        match self.state {
            State::Body => {}
            State::Desc => {
                self.result.push('[');
                self.result.push_str(&self.description);
            }
            State::Link => {
                self.result.push('[');
                self.result.push_str(&self.description);
                self.result.push(']');
            }
            State::Address => {
                self.result.push('[');
                self.result.push_str(&self.description);
                self.result.push_str("](");
                self.result.push_str(&self.address);
            }
        }
        self.description.clear();
        self.address.clear();
        self.state = State::Body;
    }

    /// Closes the parser and hands out everything produced since the last reset.
    pub fn finish(&mut self) -> String {
        self.close();
        std::mem::take(&mut self.result)
    }

    /// Rewrites all links in `text`. Equivalent to `reset`, `feed` and `close`.
    pub fn convert(&mut self, text: &str) -> String {
        self.reset();
        self.feed(text);
        self.finish()
    }

    fn step(&mut self, class: CharClass) {
        match (self.state, class) {
            (State::Body, CharClass::OpenBracket) => self.state = State::Desc,
            (State::Body, other) => self.result.push(other.as_char()),

            (State::Desc, CharClass::CloseBracket) => self.state = State::Link,
            (State::Desc, other) => self.description.push(other.as_char()),

            (State::Link, CharClass::OpenParen) => self.state = State::Address,
            (State::Link, other) => {
                // No address follows, so the brackets were plain text.
                self.restore_description();
                self.result.push(other.as_char());
            }

            (State::Address, CharClass::CloseParen) => self.end_address(),
            (State::Address, other) => self.address.push(other.as_char()),
        }
    }

    fn restore_description(&mut self) {
        self.result.push('[');
        self.result.push_str(&self.description);
        self.result.push(']');
        self.description.clear();
        self.state = State::Body;
    }

    fn end_address(&mut self) {
        let description = std::mem::take(&mut self.description);
        let address = std::mem::take(&mut self.address);

        if address.is_empty() {
            let target = address::decode(&description.replace(':', "/"));
            self.push_wikilink(&target, "");
        } else if address::is_external(&address) {
            self.result.push('[');
            self.result.push_str(&description);
            self.result.push_str("](");
            self.result.push_str(&address);
            self.result.push(')');
        } else {
            let relative = address.strip_prefix("./").unwrap_or(&address);
            let target = address::decode(relative);
            self.push_wikilink(&target, &description);
        }

        self.state = State::Body;
    }

    fn push_wikilink(&mut self, target: &str, description: &str) {
        self.result.push_str("[[");
        self.result.push_str(target);
        if !description.is_empty() {
            self.result.push('|');
            self.result.push_str(description);
        }
        self.result.push_str("]]");
    }
}

/// Rewrites all links in `text` with a fresh parser.
pub fn to_wikilinks(text: &str) -> String {
    LinkParser::new().convert(text)
}
