//! Script region extraction for Svelte components.
//!
//! Zero-copy byte scanning: regions borrow their content and attributes
//! from the document.

use memchr::{memchr, memmem};
use ordo_carton::text::find_ignore_ascii_case;
use ordo_carton::{FxHashMap, Span};

const TAG_SCRIPT: &[u8] = b"script";
const CLOSING_SCRIPT: &[u8] = b"</script";
const COMMENT_OPEN: &[u8] = b"<!--";
const COMMENT_CLOSE: &[u8] = b"-->";

/// Which scope a script block runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionRole {
    /// `<script context="module">` or `<script module>`, evaluated once per module
    Module,
    /// Plain `<script>`, evaluated per component instance
    Instance,
}

/// A `<script>` block located in a Svelte document
#[derive(Debug, Clone)]
pub struct EmbeddedRegion<'a> {
    /// Text between the opening and closing tags
    pub content: &'a str,
    /// Span of `content` in the document
    pub span: Span,
    pub role: RegionRole,
    /// Attribute text of the opening tag, trimmed, verbatim
    pub attributes: &'a str,
    /// Parsed attributes; boolean attributes map to `""`
    pub attrs: FxHashMap<&'a str, &'a str>,
}

impl<'a> EmbeddedRegion<'a> {
    /// The `lang` attribute, e.g. `ts`
    pub fn lang(&self) -> Option<&'a str> {
        self.attr("lang")
    }

    /// Look up an attribute by ASCII case-insensitive name
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    #[inline]
    pub fn is_module(&self) -> bool {
        self.role == RegionRole::Module
    }
}

/// Locate every `<script>` block of `document`, in document order.
///
/// Tag names match case-insensitively, quoted attribute values may contain
/// `>`, and blocks inside HTML comments are skipped. A block without a
/// closing tag ends the scan.
pub fn extract_regions(document: &str) -> Vec<EmbeddedRegion<'_>> {
    let bytes = document.as_bytes();
    let len = bytes.len();
    let mut regions = Vec::new();
    let mut pos = 0;

    while pos < len {
        let Some(next_lt) = memchr(b'<', &bytes[pos..]) else {
            break;
        };
        pos += next_lt;

        if bytes[pos..].starts_with(COMMENT_OPEN) {
            match memmem::find(&bytes[pos + COMMENT_OPEN.len()..], COMMENT_CLOSE) {
                Some(end) => {
                    pos += COMMENT_OPEN.len() + end + COMMENT_CLOSE.len();
                    continue;
                }
                None => break,
            }
        }

        if !is_script_open(bytes, pos) {
            pos += 1;
            continue;
        }

        let attr_start = pos + 1 + TAG_SCRIPT.len();
        let Some(tag_end) = find_tag_end(bytes, attr_start) else {
            break;
        };

        // `<script src="..." />` has no content
        if bytes[tag_end - 1] == b'/' {
            pos = tag_end + 1;
            continue;
        }

        let content_start = tag_end + 1;
        let Some(content_end) = find_ignore_ascii_case(bytes, CLOSING_SCRIPT, content_start) else {
            tracing::debug!("unclosed <script> at byte {}", pos);
            break;
        };

        let attributes = &document[attr_start..tag_end];
        let attrs = parse_attributes(attributes);
        let role = role_of(&attrs);

        regions.push(EmbeddedRegion {
            content: &document[content_start..content_end],
            span: Span::new(content_start, content_end),
            role,
            attributes: attributes.trim(),
            attrs,
        });

        pos = memchr(b'>', &bytes[content_end..]).map_or(len, |i| content_end + i + 1);
    }

    tracing::debug!("found {} script region(s)", regions.len());
    regions
}

/// `<script` followed by whitespace, `>` or `/`
#[inline]
fn is_script_open(bytes: &[u8], pos: usize) -> bool {
    let name_start = pos + 1;
    let name_end = name_start + TAG_SCRIPT.len();
    name_end < bytes.len()
        && bytes[name_start..name_end].eq_ignore_ascii_case(TAG_SCRIPT)
        && matches!(bytes[name_end], b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
}

/// Position of the `>` closing an opening tag, skipping quoted values
fn find_tag_end(bytes: &[u8], mut pos: usize) -> Option<usize> {
    while pos < bytes.len() {
        match bytes[pos] {
            b'>' => return Some(pos),
            quote @ (b'"' | b'\'') => {
                pos += 1;
                pos += memchr(quote, &bytes[pos..])?;
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

fn parse_attributes(source: &str) -> FxHashMap<&str, &str> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut attrs = FxHashMap::default();
    let mut pos = 0;

    while pos < len {
        while pos < len && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'/') {
            pos += 1;
        }
        if pos >= len {
            break;
        }

        let name_start = pos;
        while pos < len && !matches!(bytes[pos], b'=' | b' ' | b'\t' | b'\n' | b'\r' | b'/') {
            pos += 1;
        }
        let name = &source[name_start..pos];

        while pos < len && matches!(bytes[pos], b' ' | b'\t') {
            pos += 1;
        }

        let value = if pos < len && bytes[pos] == b'=' {
            pos += 1;
            while pos < len && matches!(bytes[pos], b' ' | b'\t') {
                pos += 1;
            }

            if pos < len && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
                let quote = bytes[pos];
                pos += 1;
                let value_start = pos;
                pos = memchr(quote, &bytes[pos..]).map_or(len, |i| pos + i);
                let value = &source[value_start..pos];
                pos = (pos + 1).min(len);
                value
            } else {
                let value_start = pos;
                while pos < len && !bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                &source[value_start..pos]
            }
        } else {
            ""
        };

        if !name.is_empty() {
            attrs.insert(name, value);
        }
    }

    attrs
}

fn role_of(attrs: &FxHashMap<&str, &str>) -> RegionRole {
    let is_module = attrs.iter().any(|(name, value)| {
        name.eq_ignore_ascii_case("module")
            || (name.eq_ignore_ascii_case("context") && value.trim().eq_ignore_ascii_case("module"))
    });
    if is_module {
        RegionRole::Module
    } else {
        RegionRole::Instance
    }
}
