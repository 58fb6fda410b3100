//! Atelier Svelte - The Svelte component workshop for ordo.
//!
//! Finds the `<script>` blocks of a Svelte component (instance scope and
//! module scope) and runs the import sorter on each one independently,
//! splicing the results back without disturbing the surrounding markup.
//!
//! # Example
//!
//! ```
//! use ordo_atelier_svelte::process_svelte;
//! use ordo_glyph::OrderingPolicy;
//!
//! let source = "<script>\nimport b from './b';\nimport a from 'a';\n</script>\n<h1>hi</h1>\n";
//! let sorted = process_svelte(source, &OrderingPolicy::default());
//! assert_eq!(sorted, "<script>\nimport a from 'a';\nimport b from './b';\n</script>\n<h1>hi</h1>\n");
//! ```

mod process;
mod region;

pub use process::*;
pub use region::*;

use std::path::Path;

/// File extension of Svelte components
pub const SVELTE_EXTENSION: &str = "svelte";

/// Check if a path names a Svelte component
#[inline]
pub fn is_svelte_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SVELTE_EXTENSION))
}
