//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone when encoding a path segment, as `encodeURIComponent` does
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode a single URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Decode a percent-encoded path segment; `None` if it is not UTF-8
pub fn decode_segment(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Whether a decoded segment can be used as a single file name
pub fn is_file_name_safe(segment: &str) -> bool {
    !segment.trim().is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(&['/', '\\', '\0'][..])
}
