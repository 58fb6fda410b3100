//! Group matching, comparison and statement predicates.
//!
//! Everything here works on the literal text of a single import statement.
//! Recognition is structural (regular expressions over the statement), not
//! a parse of the surrounding language.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

/// Reserved pattern: any path that does not start with `.` or `/`
pub const THIRD_PARTY_MODULES: &str = "<THIRD_PARTY_MODULES>";

/// Reserved pattern: any path that starts with `.` or `/`
pub const LOCAL_MODULES: &str = "<LOCAL_MODULES>";

/// Pattern used when a policy names no groups: bare specifiers first,
/// relative paths in the catch-all group after them.
pub const DEFAULT_IMPORT_ORDER: &str = "^[^./]";

static MODULE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"from\s+['"]([^'"]+)['"]|import\s+['"]([^'"]+)['"]"#)
        .expect("module path regex is valid")
});

static TYPE_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*import\s+type\s+").expect("type import regex is valid"));

// `import type from 'x'` binds a default export named `type`.
static TYPE_AS_DEFAULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*import\s+type\s+from\s").expect("type default regex is valid")
});

static SIDE_EFFECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^\s*import\s+['"][^'"]+['"];?\s*$"#).expect("side effect regex is valid")
});

/// A compiled group pattern
#[derive(Debug, Clone)]
pub enum GroupPattern {
    /// `<THIRD_PARTY_MODULES>`
    ThirdParty,
    /// `<LOCAL_MODULES>`
    Local,
    /// A pattern that compiled as a regular expression
    Regex(Regex),
    /// A pattern that failed to compile; matched as a substring
    Literal(String),
}

impl GroupPattern {
    pub fn compile(pattern: &str) -> Self {
        match pattern {
            THIRD_PARTY_MODULES => Self::ThirdParty,
            LOCAL_MODULES => Self::Local,
            _ => match Regex::new(pattern) {
                Ok(regex) => Self::Regex(regex),
                Err(err) => {
                    tracing::warn!(
                        "import order pattern {:?} is not a valid regex, matching it literally: {}",
                        pattern,
                        err
                    );
                    Self::Literal(pattern.to_string())
                }
            },
        }
    }

    #[inline]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::ThirdParty => !is_local_path(path),
            Self::Local => is_local_path(path),
            Self::Regex(regex) => regex.is_match(path),
            Self::Literal(literal) => path.contains(literal.as_str()),
        }
    }
}

#[inline]
fn is_local_path(path: &str) -> bool {
    path.starts_with('.') || path.starts_with('/')
}

/// Ordered list of compiled group patterns.
///
/// The index of the first matching pattern is the group; a path matching
/// nothing lands in the catch-all group `patterns.len()`.
#[derive(Debug, Clone)]
pub struct GroupMatcher {
    patterns: Vec<GroupPattern>,
}

impl GroupMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| GroupPattern::compile(p.as_ref()))
                .collect(),
        }
    }

    #[inline]
    pub fn group_of(&self, path: &str) -> usize {
        self.patterns
            .iter()
            .position(|pattern| pattern.matches(path))
            .unwrap_or(self.patterns.len())
    }

    /// Index of the implicit final group
    #[inline]
    pub fn catch_all(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn patterns(&self) -> &[GroupPattern] {
        &self.patterns
    }
}

/// Classify a single path against `patterns` without keeping the compiled
/// matcher around.
pub fn match_group<S: AsRef<str>>(path: &str, patterns: &[S]) -> usize {
    GroupMatcher::new(patterns).group_of(path)
}

/// Natural comparison: digit runs compare by numeric value, punctuation
/// sorts before digits and digits before letters, letters compare
/// case-folded. Punctuation follows root collation order (`_` before `-`,
/// `@` before `$`), not code point order.
///
/// When `case_insensitive` is false a difference in case alone is broken
/// with lowercase first; otherwise such strings compare equal.
pub fn compare_natural(a: &str, b: &str, case_insensitive: bool) -> Ordering {
    let folded = compare_folded(a, b);
    if folded != Ordering::Equal || case_insensitive {
        return folded;
    }
    compare_case(a, b)
}

fn compare_folded(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => (l, r),
        };

        if l.is_ascii_digit() && r.is_ascii_digit() {
            let l_run = take_digits(&mut left);
            let r_run = take_digits(&mut right);
            let ord = compare_digit_runs(&l_run, &r_run);
            if ord != Ordering::Equal {
                return ord;
            }
            continue;
        }

        let ord = collation_key(l).cmp(&collation_key(r));
        if ord != Ordering::Equal {
            return ord;
        }
        left.next();
        right.next();
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Punctuation and symbols in root collation order; anything missing
/// ranks after them by code point.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// (class, rank): whitespace and punctuation, then digits, then letters.
/// Letters rank by their lowercase form.
#[inline]
fn collation_key(c: char) -> (u8, u32) {
    if c.is_ascii_digit() {
        (1, c as u32)
    } else if c.is_alphabetic() {
        (2, c.to_lowercase().next().unwrap_or(c) as u32)
    } else if c.is_whitespace() {
        (0, 0)
    } else {
        let rank = PUNCTUATION_ORDER
            .chars()
            .position(|p| p == c)
            .map_or(0x100 + c as u32, |i| i as u32 + 1);
        (0, rank)
    }
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (l, r) in a.chars().zip(b.chars()) {
        if l == r {
            continue;
        }
        if l.is_lowercase() && r.is_uppercase() {
            return Ordering::Less;
        }
        if l.is_uppercase() && r.is_lowercase() {
            return Ordering::Greater;
        }
        return l.cmp(&r);
    }
    a.len().cmp(&b.len())
}

/// Sort the named specifiers of an import statement.
///
/// The first brace block is split on commas and reassembled as `{ a, b }`,
/// ordered by the imported name (the part before `as`, ignoring an inline
/// `type` modifier). Statements without a brace block, or whose brace block
/// holds comments, come back unchanged.
pub fn sort_specifiers(import_text: &str, case_insensitive: bool) -> String {
    let Some(open) = import_text.find('{') else {
        return import_text.to_string();
    };
    let Some(close) = import_text[open..].find('}').map(|i| open + i) else {
        return import_text.to_string();
    };

    let inner = &import_text[open + 1..close];
    if inner.contains("//") || inner.contains("/*") {
        return import_text.to_string();
    }

    let mut specifiers: Vec<&str> = inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if specifiers.is_empty() {
        return import_text.to_string();
    }

    specifiers.sort_by(|a, b| {
        compare_natural(specifier_key(a), specifier_key(b), case_insensitive)
    });

    let mut result = String::with_capacity(import_text.len() + 4);
    result.push_str(&import_text[..open]);
    result.push_str("{ ");
    result.push_str(&specifiers.join(", "));
    result.push_str(" }");
    result.push_str(&import_text[close + 1..]);
    result
}

/// `Foo as Bar` -> `Foo`, `type Foo` -> `Foo`
fn specifier_key(specifier: &str) -> &str {
    let mut words = specifier.split_whitespace();
    let first = words.next().unwrap_or(specifier);
    match (first, words.next()) {
        ("type", Some(name)) if name != "as" => name,
        _ => first,
    }
}

/// `import type ...`
#[inline]
pub fn is_type_only_import(import_text: &str) -> bool {
    TYPE_ONLY.is_match(import_text) && !TYPE_AS_DEFAULT.is_match(import_text)
}

/// `import 'module'` with no bindings
#[inline]
pub fn is_side_effect_import(import_text: &str) -> bool {
    SIDE_EFFECT.is_match(import_text)
}

/// The module specifier string of an import, or `""` when none is found
pub fn extract_module_path(import_text: &str) -> &str {
    MODULE_PATH
        .captures(import_text)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map_or("", |m| m.as_str())
}
