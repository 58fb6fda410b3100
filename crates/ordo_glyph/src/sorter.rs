//! The import sort engine.
//!
//! One pass per region: scan, classify, sort, rebuild. Text outside the
//! import block is carried through verbatim; text between imports is kept
//! either as comments attached to a statement or as code re-emitted after
//! the sorted block.

use ordo_carton::text::{indent_before, is_blank, trim_leading_blank_lines};

use crate::comments::{leading_comment_run, separate_banner, split_trailing_comment};
use crate::matcher::{compare_natural, sort_specifiers, GroupMatcher};
use crate::options::OrderingPolicy;
use crate::scan::{scan_imports, ImportStatement};

/// Result of sorting one source text
#[derive(Debug, Clone)]
pub struct SortResult {
    /// The rewritten text
    pub code: String,

    /// Whether the text was changed
    pub changed: bool,
}

/// Import sorter bound to one policy.
///
/// Group patterns are compiled once, so a sorter can be reused across all
/// regions of a document.
pub struct ImportSorter<'a> {
    policy: &'a OrderingPolicy,
    matcher: GroupMatcher,
}

impl<'a> ImportSorter<'a> {
    pub fn new(policy: &'a OrderingPolicy) -> Self {
        Self {
            policy,
            matcher: policy.group_matcher(),
        }
    }

    #[inline]
    pub fn policy(&self) -> &OrderingPolicy {
        self.policy
    }

    /// Sort the imports of `source`.
    ///
    /// Never fails: text that is not recognised as an import is left where
    /// it is, and a source without imports comes back unchanged.
    pub fn sort(&self, source: &str) -> SortResult {
        let (banner, rest) = separate_banner(source);

        let Some(mut block) = ImportBlock::scan(rest) else {
            return SortResult {
                code: source.to_string(),
                changed: false,
            };
        };

        for statement in &mut block.statements {
            statement.group = Some(self.matcher.group_of(&statement.path));
        }

        let case_insensitive = self.policy.import_order_case_insensitive;
        block.statements.sort_by(|a, b| {
            a.group_or_last()
                .cmp(&b.group_or_last())
                .then_with(|| compare_natural(&a.path, &b.path, case_insensitive))
        });

        if self.policy.import_order_sort_specifiers {
            for statement in &mut block.statements {
                statement.text = sort_specifiers(&statement.text, case_insensitive);
            }
        }

        let mut code = String::with_capacity(source.len() + 16);
        code.push_str(banner);
        block.render(&mut code, self.policy.import_order_separation);

        let changed = code != source;
        tracing::debug!(
            "sorted {} import(s), {} displaced segment(s), changed: {}",
            block.statements.len(),
            block.displaced.len(),
            changed
        );

        SortResult { code, changed }
    }
}

/// A region split around its imports
struct ImportBlock<'a> {
    /// Text before the first import's line, minus comments attached to it
    before: &'a str,
    /// Indentation of the first import, applied to every rebuilt line
    indent: &'a str,
    statements: Vec<ImportStatement>,
    /// Non-import code found between imports, in source order
    displaced: Vec<&'a str>,
    /// Text after the last import (and its same-line comment)
    after: &'a str,
    newline: &'static str,
}

impl<'a> ImportBlock<'a> {
    fn scan(text: &'a str) -> Option<Self> {
        let mut statements = scan_imports(text);
        let first = statements.first()?.span.start;
        let indent = indent_before(text, first);
        let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };

        let head = &text[..first - indent.len()];
        let (before, comments) = split_leading_comments(head, indent);
        statements[0].leading_comments = comments;

        let mut displaced = Vec::new();
        for i in 1..statements.len() {
            let start = statements[i].span.start;
            let gap_end = start - indent_before(text, start).len();
            let gap = &text[statements[i - 1].span.end..gap_end];

            let gap = take_trailing_comment(&mut statements[i - 1], gap);
            let (residue, comments) = split_leading_comments(gap, indent);
            statements[i].leading_comments = comments;

            let residue = trim_leading_blank_lines(residue).trim_end();
            if !residue.is_empty() {
                displaced.push(residue);
            }
        }

        let last = statements.len() - 1;
        let tail = &text[statements[last].span.end..];
        let after = take_trailing_comment(&mut statements[last], tail);

        Some(Self {
            before,
            indent,
            statements,
            displaced,
            after,
            newline,
        })
    }

    fn render(&self, out: &mut String, separation: bool) {
        let newline = self.newline;

        out.push_str(self.before);
        out.push_str(self.indent);

        let mut previous_group = None;
        for statement in &self.statements {
            let group = statement.group_or_last();
            if let Some(previous) = previous_group {
                out.push_str(newline);
                if separation && previous != group {
                    out.push_str(newline);
                }
                out.push_str(self.indent);
            }
            for comment in &statement.leading_comments {
                out.push_str(comment);
                out.push_str(newline);
                out.push_str(self.indent);
            }
            out.push_str(&statement.text);
            if let Some(comment) = &statement.trailing_comment {
                out.push_str(comment);
            }
            previous_group = Some(group);
        }

        for segment in &self.displaced {
            out.push_str(newline);
            out.push_str(newline);
            out.push_str(segment);
        }

        if is_blank(self.after) {
            out.push_str(self.after);
        } else {
            out.push_str(newline);
            out.push_str(newline);
            out.push_str(trim_leading_blank_lines(self.after));
        }
    }
}

/// Move a same-line comment following `statement` onto it, returning the
/// rest of `gap`.
fn take_trailing_comment<'a>(statement: &mut ImportStatement, gap: &'a str) -> &'a str {
    let line_len = gap.find('\n').unwrap_or(gap.len());
    match split_trailing_comment(&gap[..line_len]) {
        Some(comment) => {
            statement.trailing_comment = Some(comment.to_string());
            &gap[line_len..]
        }
        None => gap,
    }
}

/// Split the comment lines at the end of `gap` from what precedes them.
///
/// Comment lines lose `indent` (or, failing that, all leading whitespace)
/// so they can be re-indented with the block.
fn split_leading_comments<'a>(gap: &'a str, indent: &str) -> (&'a str, Vec<String>) {
    let lines: Vec<&str> = gap.split_inclusive('\n').collect();
    let bare: Vec<&str> = lines
        .iter()
        .map(|line| line.trim_end_matches(['\n', '\r']))
        .collect();

    let run = leading_comment_run(&bare);
    if run == 0 {
        return (gap, Vec::new());
    }

    let keep = lines.len() - run;
    let residue_len: usize = lines[..keep].iter().map(|line| line.len()).sum();
    let comments = bare[keep..]
        .iter()
        .map(|line| {
            line.strip_prefix(indent)
                .unwrap_or_else(|| line.trim_start())
                .to_string()
        })
        .collect();

    (&gap[..residue_len], comments)
}
