//! Comment handling around import blocks.
//!
//! Line-oriented heuristics only: a line "is a comment" when its trimmed
//! form opens or closes one. Nothing here tracks whether a comment marker
//! sits inside a string.

/// Split `text` into the leading file banner and the remainder.
///
/// The banner is the run of lines from the top that are blank or look like
/// comments (`//`, `/*`, or containing `*/`). The first other line, or any
/// line starting with the `import` keyword, begins the remainder. When no
/// such line exists the banner is empty and the remainder is all of `text`.
///
/// `banner` and `remainder` are adjacent slices: `banner + remainder == text`.
pub fn separate_banner(text: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if starts_with_import(trimmed) || !(trimmed.is_empty() || is_comment_line(trimmed)) {
            return text.split_at(offset);
        }
        offset += line.len();
    }
    ("", text)
}

/// Whether a trimmed line opens, continues on one line, or closes a comment.
#[inline]
pub fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.contains("*/")
}

#[inline]
fn starts_with_import(trimmed: &str) -> bool {
    trimmed
        .strip_prefix("import")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

/// Split a same-line comment off the text following an import.
///
/// `rest` is the remainder of the import's line. Returns the comment with
/// its leading whitespace when `rest` holds nothing but a `//` comment or a
/// single closed `/* */` comment.
pub fn split_trailing_comment(rest: &str) -> Option<&str> {
    let trimmed = rest.trim();
    if trimmed.starts_with("//") || is_closed_block_comment(trimmed) {
        Some(rest.trim_end())
    } else {
        None
    }
}

/// Whether a trimmed line is exactly one closed `/* ... */` comment
#[inline]
fn is_closed_block_comment(trimmed: &str) -> bool {
    trimmed.starts_with("/*")
        && trimmed.ends_with("*/")
        && trimmed.len() >= 4
        && !trimmed[2..trimmed.len() - 2].contains("*/")
}

/// Lines of comments sitting directly above an import.
///
/// `lines` are the complete lines preceding the import, top to bottom.
/// Walks upward collecting `//` lines and whole `/* ... */` blocks, stopping
/// at a blank line, code, or a block comment whose opener is not in view.
/// A block only counts when its opener line starts the comment and its
/// closer line ends it, so code sharing a line with a comment stops the run.
/// Returns how many trailing lines of `lines` form the comment run.
pub fn leading_comment_run(lines: &[&str]) -> usize {
    let mut taken = 0;
    let mut idx = lines.len();

    while idx > 0 {
        let trimmed = lines[idx - 1].trim();
        if trimmed.starts_with("//") || is_closed_block_comment(trimmed) {
            idx -= 1;
            taken += 1;
            continue;
        }
        if is_block_closer(trimmed) {
            let Some(opener) = find_block_opener(&lines[..idx - 1]) else {
                break;
            };
            taken += idx - opener;
            idx = opener;
            continue;
        }
        break;
    }

    taken
}

/// A line ending a multi-line block: one `*/`, at the very end, no opener.
#[inline]
fn is_block_closer(trimmed: &str) -> bool {
    trimmed.ends_with("*/")
        && !trimmed.contains("/*")
        && trimmed.find("*/") == Some(trimmed.len() - 2)
}

/// Index of the line opening the block whose body runs to the end of
/// `lines`. Fails when an earlier `*/` closes something first.
fn find_block_opener(lines: &[&str]) -> Option<usize> {
    for (i, line) in lines.iter().enumerate().rev() {
        let trimmed = line.trim();
        if trimmed.contains("*/") {
            return None;
        }
        if trimmed.starts_with("/*") {
            return Some(i);
        }
    }
    None
}
