//! # ordo_glyph
//!
//! Glyph - The import ordering engine of ordo.
//! Reorders `import` statements in script text against a pattern-based
//! policy, leaving every other byte where it was.
//!
//! ## Pipeline
//!
//! Each region of text goes through four stages, once:
//! - **Scan**: a narrow recognizer ([`scan::try_match_import`]) finds import
//!   statements; no syntax tree is built
//! - **Classify**: each module path is assigned the index of the first
//!   matching group pattern ([`GroupMatcher`])
//! - **Sort**: stable order by group, then natural path comparison
//! - **Rebuild**: the block is re-emitted with optional group separation
//!   and specifier sorting; banner comments and surrounding code are kept
//!
//! ## Example
//!
//! ```
//! use ordo_glyph::{sort_imports, OrderingPolicy};
//!
//! let policy = OrderingPolicy::with_groups(["<THIRD_PARTY_MODULES>", "<LOCAL_MODULES>"]);
//! let sorted = sort_imports("import b from './b';\nimport a from 'a';\n", &policy);
//! assert_eq!(sorted, "import a from 'a';\nimport b from './b';\n");
//! ```

pub mod comments;
pub mod matcher;
mod options;
pub mod scan;
mod sorter;

pub use matcher::{
    compare_natural, match_group, sort_specifiers, GroupMatcher, GroupPattern, LOCAL_MODULES,
    THIRD_PARTY_MODULES,
};
pub use options::*;
pub use scan::ImportStatement;
pub use sorter::*;

/// Sort the imports of a script source string
///
/// This is the main entry point for plain script files. A source without
/// imports is returned unchanged.
#[inline]
pub fn sort_imports(source: &str, policy: &OrderingPolicy) -> String {
    ImportSorter::new(policy).sort(source).code
}
