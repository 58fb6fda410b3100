//! Line and whitespace helpers over `&str` buffers.
//!
//! All offsets are byte offsets. Helpers only ever split on ASCII bytes, so
//! every returned slice lies on a UTF-8 boundary.

use memchr::{memchr2, memrchr};

/// Byte offset of the start of the line containing `pos`.
#[inline]
pub fn line_start(text: &str, pos: usize) -> usize {
    memrchr(b'\n', &text.as_bytes()[..pos]).map_or(0, |i| i + 1)
}

/// The horizontal whitespace between the start of the line and `pos`.
///
/// Returns an empty string when anything other than spaces or tabs precedes
/// `pos` on its line.
pub fn indent_before(text: &str, pos: usize) -> &str {
    let start = line_start(text, pos);
    let prefix = &text[start..pos];
    if prefix.bytes().all(|b| b == b' ' || b == b'\t') {
        prefix
    } else {
        ""
    }
}

/// Drop leading blank lines while keeping the indentation of the first
/// line that carries content. Leading whitespace on the same line as the
/// first content (no newline before it) is dropped entirely.
pub fn trim_leading_blank_lines(text: &str) -> &str {
    let content = text.trim_start();
    let lead = &text[..text.len() - content.len()];
    match memrchr(b'\n', lead.as_bytes()) {
        Some(i) => &text[i + 1..],
        None => content,
    }
}

#[inline]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// ASCII case-insensitive search for `needle` in `haystack`, starting at
/// `from`. Candidate positions are located with `memchr2` on the first byte.
pub fn find_ignore_ascii_case(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let (&first, _) = needle.split_first()?;
    let lower = first.to_ascii_lowercase();
    let upper = first.to_ascii_uppercase();
    let mut pos = from;

    while pos + needle.len() <= haystack.len() {
        let found = memchr2(lower, upper, &haystack[pos..])?;
        let candidate = pos + found;
        if candidate + needle.len() > haystack.len() {
            return None;
        }
        if haystack[candidate..candidate + needle.len()].eq_ignore_ascii_case(needle) {
            return Some(candidate);
        }
        pos = candidate + 1;
    }

    None
}
