//! Sort command - Reorder imports in script and Svelte files

use clap::Args;
use glob::Pattern;
use ignore::WalkBuilder;
use ordo_atelier_svelte::is_svelte_file;
use ordo_glyph::{ImportSorter, OrderingPolicy};
use ordo_vitrine::{compile_excludes, is_excluded, PreprocessContext, SortImportsPlugin};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::load_config;

/// Plain script extensions sorted as a whole file
const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

#[derive(Args, Default)]
pub struct SortArgs {
    /// Glob pattern(s) selecting files (default: every script and .svelte file)
    pub patterns: Vec<String>,

    /// Check import order without writing (exit with error if files need sorting)
    #[arg(long)]
    pub check: bool,

    /// Write sorted output to files
    #[arg(short, long)]
    pub write: bool,

    /// Config file path (default: ./ordo.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Insert a blank line between import groups
    #[arg(long)]
    pub separation: bool,

    /// Sort named specifiers inside each import
    #[arg(long)]
    pub sort_specifiers: bool,
}

pub fn run(args: SortArgs) {
    let policy = build_policy(&args);
    if let Err(e) = compile_excludes(&policy.import_order_exclude) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let patterns = match compile_patterns(&args.patterns) {
        Ok(patterns) => patterns,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let files = collect_files(&patterns);
    if files.is_empty() {
        eprintln!("No script or .svelte files found matching the patterns");
        return;
    }

    eprintln!("Found {} file(s)", files.len());

    let plugin = SortImportsPlugin::standalone();
    let sorter = ImportSorter::new(&policy);

    let tally = Tally::default();

    files.par_iter().for_each(|path| {
        match process_file(path, &plugin, &sorter, args.check, args.write) {
            Ok(changed) => tally.record(changed),
            Err(err) => {
                eprintln!("Error sorting {}: {}", path.display(), err);
                tally.record_error();
            }
        }
    });

    eprintln!();
    for line in tally.summary(files.len(), RunMode::from_args(&args)) {
        eprintln!("{}", line);
    }

    if tally.failed(args.check) {
        std::process::exit(1);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunMode {
    Check,
    Write,
    DryRun,
}

impl RunMode {
    fn from_args(args: &SortArgs) -> Self {
        if args.check {
            Self::Check
        } else if args.write {
            Self::Write
        } else {
            Self::DryRun
        }
    }
}

/// Per-file outcomes, counted across the worker threads
#[derive(Default)]
struct Tally {
    changed: AtomicUsize,
    unchanged: AtomicUsize,
    errored: AtomicUsize,
}

impl Tally {
    fn record(&self, changed: bool) {
        let counter = if changed { &self.changed } else { &self.unchanged };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.errored.fetch_add(1, Ordering::Relaxed);
    }

    /// Errors always fail the run; unsorted files only fail `--check`.
    fn failed(&self, check: bool) -> bool {
        self.errored.load(Ordering::Relaxed) > 0
            || (check && self.changed.load(Ordering::Relaxed) > 0)
    }

    fn summary(&self, total: usize, mode: RunMode) -> Vec<String> {
        let changed = self.changed.load(Ordering::Relaxed);
        let unchanged = self.unchanged.load(Ordering::Relaxed);
        let errored = self.errored.load(Ordering::Relaxed);

        let (headline, changed_label, unchanged_label) = match mode {
            RunMode::Check => (
                format!("Checked {} file(s)", total),
                "have unsorted imports",
                Some("already in order"),
            ),
            RunMode::Write => (
                format!("Sorted {} file(s)", total),
                "rewritten",
                Some("left as is"),
            ),
            RunMode::DryRun => (
                format!("Checked {} file(s) (use --write to apply changes)", total),
                "would be rewritten",
                None,
            ),
        };

        let mut lines = vec![headline];
        if changed > 0 {
            lines.push(format!("  {} file(s) {}", changed, changed_label));
        }
        if let Some(label) = unchanged_label.filter(|_| unchanged > 0) {
            lines.push(format!("  {} file(s) {}", unchanged, label));
        }
        if errored > 0 {
            lines.push(format!("  {} file(s) could not be sorted", errored));
        }
        lines
    }
}

/// Config file options, with command-line flags switched on top
fn build_policy(args: &SortArgs) -> OrderingPolicy {
    let mut policy = load_config(args.config.as_deref()).policy;
    policy.import_order_separation |= args.separation;
    policy.import_order_sort_specifiers |= args.sort_specifiers;
    policy
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, String> {
    patterns
        .iter()
        .map(|pattern| {
            let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
            Pattern::new(pattern)
                .map_err(|e| format!("Invalid glob pattern `{}`: {}", pattern, e))
        })
        .collect()
}

fn collect_files(patterns: &[Pattern]) -> Vec<PathBuf> {
    // Use ignore crate to walk directories respecting .gitignore
    let walker = WalkBuilder::new(".")
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| is_sortable(path) && matches_patterns(path, patterns))
        .collect();

    files.sort();
    files.dedup();
    files
}

#[inline]
fn is_sortable(path: &Path) -> bool {
    is_svelte_file(path) || is_script_file(path)
}

#[inline]
fn is_script_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

#[inline]
fn matches_patterns(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return true;
    }
    let relative = path.strip_prefix(".").unwrap_or(path);
    patterns.iter().any(|pattern| pattern.matches_path(relative))
}

/// Sort one file's source text. Returns the new text, or `None` when the
/// file is excluded or already sorted.
fn sort_source(
    path: &Path,
    source: &str,
    plugin: &SortImportsPlugin,
    sorter: &ImportSorter<'_>,
) -> Result<Option<String>, String> {
    let policy = sorter.policy();
    let relative = path.strip_prefix(".").unwrap_or(path);

    let code = if is_svelte_file(path) {
        let ctx = PreprocessContext::new(Some(relative), policy);
        plugin.preprocess(source, &ctx).map_err(|e| e.to_string())?
    } else if is_excluded(relative, &policy.import_order_exclude).map_err(|e| e.to_string())? {
        return Ok(None);
    } else {
        sorter.sort(source).code
    };

    Ok((code != source).then_some(code))
}

#[inline]
fn process_file(
    path: &Path,
    plugin: &SortImportsPlugin,
    sorter: &ImportSorter<'_>,
    check: bool,
    write: bool,
) -> Result<bool, String> {
    let source = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let Some(code) = sort_source(path, &source, plugin, sorter)? else {
        tracing::debug!("{} unchanged", path.display());
        return Ok(false);
    };

    if write && !check {
        fs::write(path, &code).map_err(|e| format!("Failed to write file: {}", e))?;
        eprintln!("Sorted: {}", path.display());
    } else {
        eprintln!("Would sort: {}", path.display());
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> OrderingPolicy {
        OrderingPolicy {
            import_order: vec!["<THIRD_PARTY_MODULES>".to_string(), "<LOCAL_MODULES>".to_string()],
            import_order_exclude: vec!["src/generated/**".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_is_sortable() {
        assert!(is_sortable(Path::new("./src/App.svelte")));
        assert!(is_sortable(Path::new("./src/main.ts")));
        assert!(is_sortable(Path::new("vite.config.mjs")));
        assert!(!is_sortable(Path::new("./src/app.css")));
        assert!(!is_sortable(Path::new("README")));
    }

    #[test]
    fn test_matches_patterns() {
        let patterns = compile_patterns(&["./src/**/*.svelte".to_string()]).unwrap();
        assert!(matches_patterns(Path::new("./src/lib/Card.svelte"), &patterns));
        assert!(!matches_patterns(Path::new("./tests/Card.svelte"), &patterns));
        assert!(matches_patterns(Path::new("./anything.ts"), &[]));
        assert!(compile_patterns(&["src/[".to_string()]).is_err());
    }

    #[test]
    fn test_sort_script_source() {
        let policy = policy();
        let plugin = SortImportsPlugin::standalone();
        let sorter = ImportSorter::new(&policy);

        let source = "import b from './b';\nimport a from 'a';\n";
        let sorted = sort_source(Path::new("./src/main.ts"), source, &plugin, &sorter).unwrap();
        assert_eq!(sorted.as_deref(), Some("import a from 'a';\nimport b from './b';\n"));

        let excluded =
            sort_source(Path::new("./src/generated/api.ts"), source, &plugin, &sorter).unwrap();
        assert_eq!(excluded, None);
    }

    #[test]
    fn test_sort_svelte_source() {
        let policy = policy();
        let plugin = SortImportsPlugin::standalone();
        let sorter = ImportSorter::new(&policy);

        let source = "<script>\nimport b from './b';\nimport a from 'a';\n</script>\n<p />\n";
        let sorted = sort_source(Path::new("./src/App.svelte"), source, &plugin, &sorter).unwrap();
        assert_eq!(
            sorted.as_deref(),
            Some("<script>\nimport a from 'a';\nimport b from './b';\n</script>\n<p />\n")
        );

        let excluded =
            sort_source(Path::new("./src/generated/Icons.svelte"), source, &plugin, &sorter)
                .unwrap();
        assert_eq!(excluded, None);
    }

    #[test]
    fn test_check_summary() {
        let tally = Tally::default();
        tally.record(true);
        tally.record(false);
        tally.record(false);

        assert_eq!(
            tally.summary(3, RunMode::Check),
            vec![
                "Checked 3 file(s)",
                "  1 file(s) have unsorted imports",
                "  2 file(s) already in order",
            ]
        );
        assert!(tally.failed(true));
        assert!(!tally.failed(false));
    }

    #[test]
    fn test_write_and_dry_run_summary() {
        let tally = Tally::default();
        tally.record(true);
        tally.record(false);
        tally.record_error();

        assert_eq!(
            tally.summary(3, RunMode::Write),
            vec![
                "Sorted 3 file(s)",
                "  1 file(s) rewritten",
                "  1 file(s) left as is",
                "  1 file(s) could not be sorted",
            ]
        );
        assert_eq!(
            tally.summary(3, RunMode::DryRun),
            vec![
                "Checked 3 file(s) (use --write to apply changes)",
                "  1 file(s) would be rewritten",
                "  1 file(s) could not be sorted",
            ]
        );
        assert!(tally.failed(false));
    }

    #[test]
    fn test_run_mode_prefers_check() {
        let args = SortArgs { check: true, write: true, ..Default::default() };
        assert_eq!(RunMode::from_args(&args), RunMode::Check);
        let args = SortArgs { write: true, ..Default::default() };
        assert_eq!(RunMode::from_args(&args), RunMode::Write);
        assert_eq!(RunMode::from_args(&SortArgs::default()), RunMode::DryRun);
    }

    #[test]
    fn test_sorted_source_is_none() {
        let policy = policy();
        let plugin = SortImportsPlugin::standalone();
        let sorter = ImportSorter::new(&policy);

        let source = "import a from 'a';\nimport b from './b';\n";
        assert_eq!(
            sort_source(Path::new("./main.js"), source, &plugin, &sorter).unwrap(),
            None
        );
    }
}
