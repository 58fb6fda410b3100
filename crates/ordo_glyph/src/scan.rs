//! Import statement recognition.
//!
//! The recognizer is a single regular expression, not a parser. Supported
//! forms, each optionally written `import type ...`:
//!
//! ```text
//! import 'side-effect';
//! import Default from 'mod';
//! import * as ns from 'mod';
//! import { a, b as c } from 'mod';
//! import Default, { a } from 'mod';
//! import Default, * as ns from 'mod';
//! ```
//!
//! A statement must start its line (indentation allowed). Module specifiers
//! are single- or double-quoted and cannot span lines; the trailing `;` is
//! optional. Anything else, including `export ... from` and dynamic
//! `import()`, is left to pass through as ordinary content.

use once_cell::sync::Lazy;
use ordo_carton::Span;
use regex::Regex;

use crate::matcher::{extract_module_path, is_side_effect_import, is_type_only_import};

static IMPORT_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?m)^[ \t]*import\s+"#,
        r#"(?:(?:type\s+)?"#,
        r#"(?:\{[^}]*\}"#,
        r#"|[\w$]+\s*,\s*\*\s+as\s+[\w$]+"#,
        r#"|[\w$*]+(?:\s*,\s*\{[^}]*\})?"#,
        r#"|\*\s+as\s+[\w$]+)"#,
        r#"\s+from\s+)?"#,
        r#"['"][^'"\n]+['"];?"#,
    ))
    .expect("import statement regex is valid")
});

/// A detected import statement within one region of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// Span of the statement, from the `import` keyword to its end
    pub span: Span,
    /// Trimmed literal text of the statement
    pub text: String,
    /// Module specifier, e.g. `./Button.svelte`
    pub path: String,
    /// Group index; `None` until classified
    pub group: Option<usize>,
    pub is_type_only: bool,
    /// False for `import 'x'`
    pub has_bindings: bool,
    /// Comment lines directly above the statement
    pub leading_comments: Vec<String>,
    /// Comment on the same line, after the statement, with its leading spacing
    pub trailing_comment: Option<String>,
}

impl ImportStatement {
    pub fn new(span: Span, source: &str) -> Self {
        let text = span.slice(source).trim().to_string();
        Self {
            span,
            path: extract_module_path(&text).to_string(),
            is_type_only: is_type_only_import(&text),
            has_bindings: !is_side_effect_import(&text),
            text,
            group: None,
            leading_comments: Vec::new(),
            trailing_comment: None,
        }
    }

    /// Group index, with unclassified statements sorting last
    #[inline]
    pub fn group_or_last(&self) -> usize {
        self.group.unwrap_or(usize::MAX)
    }
}

/// Find the next import statement starting at or after `offset`.
///
/// The returned span starts at the `import` keyword; indentation before it
/// is not part of the statement.
pub fn try_match_import(text: &str, offset: usize) -> Option<Span> {
    let found = IMPORT_STATEMENT.find_at(text, offset)?;
    let matched = found.as_str();
    let indent = matched.len() - matched.trim_start().len();
    Some(Span::new(found.start() + indent, found.end()))
}

/// Collect every import statement in `text`, in source order.
pub fn scan_imports(text: &str) -> Vec<ImportStatement> {
    let mut statements = Vec::new();
    let mut offset = 0;

    while let Some(span) = try_match_import(text, offset) {
        statements.push(ImportStatement::new(span, text));
        offset = span.end;
    }

    tracing::debug!("scanned {} import statement(s)", statements.len());
    statements
}
