//! Helpers for classifying and normalizing link addresses.
//!
//! Zim writes internal references as relative, percent-encoded paths, while external references
//! are absolute URLs. Only the former are turned into wikilinks.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{ParseError, Url};

/// Characters left untouched when quoting a file name for use in a link address.
///
/// Matches the unreserved set of RFC 3986 plus the path separator.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Returns true if the address carries a URL scheme (`https:`, `mailto:`, ...).
///
/// The `url` parser only reports [`ParseError::RelativeUrlWithoutBase`] when it could not find a
/// scheme, so every other outcome, including malformed absolute URLs such as `http://[`,
/// counts as external.
pub fn is_external(address: &str) -> bool {
    !matches!(Url::parse(address), Err(ParseError::RelativeUrlWithoutBase))
}

/// Percent-decodes an address. Invalid UTF-8 sequences are replaced, `+` is kept as is.
pub fn decode(address: &str) -> String {
    percent_decode_str(address).decode_utf8_lossy().into_owned()
}

/// Percent-encodes a file name so it can be placed in a Markdown link address.
pub fn quote_path(name: &str) -> String {
    utf8_percent_encode(name, PATH_SEGMENT).to_string()
}
