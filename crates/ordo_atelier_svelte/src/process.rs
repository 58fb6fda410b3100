//! Apply import sorting to every script region of a Svelte document.

use ordo_glyph::{ImportSorter, OrderingPolicy, SortResult};

use crate::region::extract_regions;

/// Sort the imports in each `<script>` block of `document`.
///
/// Regions are rewritten back to front, so the spans of regions not yet
/// processed stay valid while earlier splices change the buffer length.
/// Regions whose content does not change are not touched.
pub fn process_svelte(document: &str, policy: &OrderingPolicy) -> String {
    process_svelte_with(&ImportSorter::new(policy), document).code
}

/// [`process_svelte`] with a caller-provided sorter
pub fn process_svelte_with(sorter: &ImportSorter<'_>, document: &str) -> SortResult {
    let mut regions = extract_regions(document);
    if regions.is_empty() {
        return SortResult {
            code: document.to_string(),
            changed: false,
        };
    }

    regions.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    let mut code = document.to_string();
    let mut changed = false;

    for region in &regions {
        let sorted = sorter.sort(region.content);
        if !sorted.changed {
            tracing::trace!("{:?} script at {} already sorted", region.role, region.span);
            continue;
        }

        let content = restore_boundary_newlines(region.content, sorted.code);
        tracing::trace!(
            "splicing {:?} script at {} ({} -> {} bytes)",
            region.role,
            region.span,
            region.span.len(),
            content.len()
        );
        code.replace_range(region.span.start..region.span.end, &content);
        changed = true;
    }

    SortResult { code, changed }
}

/// Keep the newline right after the opening tag and right before the
/// closing tag when the original content had them.
///
/// The sorter already keeps leading blank lines and whitespace-only tails,
/// so this only acts when its output drops a boundary newline.
fn restore_boundary_newlines(original: &str, sorted: String) -> String {
    let mut content = sorted;
    if original.starts_with('\n') && !content.starts_with('\n') {
        content.insert(0, '\n');
    }
    if original.ends_with('\n') && !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordo_glyph::{LOCAL_MODULES, THIRD_PARTY_MODULES};

    fn policy() -> OrderingPolicy {
        OrderingPolicy::with_groups([THIRD_PARTY_MODULES, LOCAL_MODULES])
    }

    #[test]
    fn test_restore_boundary_newlines() {
        assert_eq!(
            restore_boundary_newlines("\nimport a;\n", "import a;".to_string()),
            "\nimport a;\n"
        );
        assert_eq!(
            restore_boundary_newlines("\nimport a;\n", "\nimport a;\n".to_string()),
            "\nimport a;\n"
        );
        assert_eq!(
            restore_boundary_newlines("import a;", "import a;".to_string()),
            "import a;"
        );
    }

    #[test]
    fn test_no_regions_is_unchanged() {
        let document = "<h1>Hello</h1>\n<style>h1 { color: red; }</style>\n";
        assert_eq!(process_svelte(document, &policy()), document);
    }

    #[test]
    fn test_sorted_regions_are_untouched() {
        let document = "<script>\nimport a from 'a';\nimport b from './b';\n</script>\n<p>hi</p>\n";
        let result = process_svelte_with(&ImportSorter::new(&policy()), document);
        assert!(!result.changed);
        assert_eq!(result.code, document);
    }

    #[test]
    fn test_splices_back_to_front() {
        // the first region grows, which would shift the second region if
        // regions were processed front to back
        let policy = OrderingPolicy {
            import_order_separation: true,
            ..policy()
        };
        let document = "<script context=\"module\">\nimport b from './b';\nimport a from 'a';\n</script>\n<div />\n<script>\nimport d from './d';\nimport c from 'c';\n</script>\n";
        let expected = "<script context=\"module\">\nimport a from 'a';\n\nimport b from './b';\n</script>\n<div />\n<script>\nimport c from 'c';\n\nimport d from './d';\n</script>\n";
        assert_eq!(process_svelte(document, &policy), expected);
    }
}
