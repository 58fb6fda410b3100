//! Ordering policy for ordo_glyph.
//!
//! Field names follow the `importOrder*` options understood by the host
//! formatter, so a policy deserializes straight from a formatter config.

use serde::{Deserialize, Serialize};

use crate::matcher::{GroupMatcher, DEFAULT_IMPORT_ORDER};

/// Import ordering policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingPolicy {
    /// Group patterns, first match wins (default: [])
    ///
    /// `<THIRD_PARTY_MODULES>` and `<LOCAL_MODULES>` are reserved; anything
    /// else is a regular expression tested against the module path.
    #[serde(default)]
    pub import_order: Vec<String>,

    /// Insert a blank line between groups (default: false)
    #[serde(default)]
    pub import_order_separation: bool,

    /// Case-fold when comparing paths and specifiers (default: false)
    #[serde(default)]
    pub import_order_case_insensitive: bool,

    /// Sort named specifiers inside each import (default: false)
    #[serde(default)]
    pub import_order_sort_specifiers: bool,

    /// Accepted for compatibility; no ordering rule reads it
    #[serde(default)]
    pub import_order_group_namespace_specifiers: bool,

    /// Syntax hints for the companion parser (default: ["typescript", "jsx"])
    #[serde(default = "default_parser_plugins")]
    pub import_order_parser_plugins: Vec<String>,

    /// File globs the host integration skips (default: [])
    #[serde(default)]
    pub import_order_exclude: Vec<String>,
}

impl Default for OrderingPolicy {
    fn default() -> Self {
        Self {
            import_order: Vec::new(),
            import_order_separation: false,
            import_order_case_insensitive: false,
            import_order_sort_specifiers: false,
            import_order_group_namespace_specifiers: false,
            import_order_parser_plugins: default_parser_plugins(),
            import_order_exclude: Vec::new(),
        }
    }
}

fn default_parser_plugins() -> Vec<String> {
    vec!["typescript".to_string(), "jsx".to_string()]
}

impl OrderingPolicy {
    /// Create a policy with the given group patterns and default flags
    pub fn with_groups<S: Into<String>>(groups: impl IntoIterator<Item = S>) -> Self {
        Self {
            import_order: groups.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// The group patterns in effect. An empty `import_order` falls back to a
    /// single pattern that sends relative paths to the catch-all group.
    #[inline]
    pub fn group_patterns(&self) -> Vec<&str> {
        if self.import_order.is_empty() {
            vec![DEFAULT_IMPORT_ORDER]
        } else {
            self.import_order.iter().map(String::as_str).collect()
        }
    }

    /// Compile the group patterns once for a sort pass
    #[inline]
    pub fn group_matcher(&self) -> GroupMatcher {
        GroupMatcher::new(&self.group_patterns())
    }
}
