//! The sort-imports plugin and its parser descriptor.

use glob::Pattern;
use ordo_atelier_svelte::{is_svelte_file, process_svelte};
use std::path::Path;

use crate::companion::{CompanionPlugin, PreprocessContext};
use crate::error::{PluginError, COMPANION_PACKAGE};

/// Parser name the host selects for Svelte files
pub const SVELTE_PARSER: &str = "svelte";

/// AST format produced by the companion parser
pub const SVELTE_AST_FORMAT: &str = "svelte-ast";

/// Import sorting plugin for the host formatter.
///
/// The companion parser is resolved once, when the plugin is built. Without
/// it, preprocessing still works but parsing fails with install guidance.
pub struct SortImportsPlugin {
    companion: Option<Box<dyn CompanionPlugin>>,
}

impl SortImportsPlugin {
    pub fn new(companion: Option<Box<dyn CompanionPlugin>>) -> Self {
        match &companion {
            Some(plugin) => tracing::debug!("using companion parser {}", plugin.name()),
            None => tracing::warn!(
                "{} not found. Svelte formatting will be limited.",
                COMPANION_PACKAGE
            ),
        }
        Self { companion }
    }

    /// Plugin that deliberately runs without a companion parser, e.g. from
    /// the command line where only preprocessing is needed.
    pub fn standalone() -> Self {
        Self { companion: None }
    }

    #[inline]
    pub fn companion(&self) -> Option<&dyn CompanionPlugin> {
        self.companion.as_deref()
    }

    /// Sort the imports of a Svelte document before the host parses it.
    ///
    /// Files matching `importOrderExclude`, and files that are not `.svelte`
    /// components, come back unchanged. An invalid exclusion glob is logged
    /// and otherwise ignored; only the companion can fail this step.
    pub fn preprocess(
        &self,
        source: &str,
        ctx: &PreprocessContext<'_>,
    ) -> Result<String, PluginError> {
        let Some(path) = ctx.filepath else {
            return Ok(source.to_string());
        };

        let excluded = is_excluded(path, &ctx.policy.import_order_exclude).unwrap_or_else(|err| {
            tracing::warn!("{}; sorting {} anyway", err, path.display());
            false
        });
        if excluded {
            tracing::debug!("{} is excluded from import sorting", path.display());
            return Ok(source.to_string());
        }
        if !is_svelte_file(path) {
            return Ok(source.to_string());
        }

        let sorted = process_svelte(source, ctx.policy);
        match &self.companion {
            Some(companion) => companion.preprocess(sorted, ctx),
            None => Ok(sorted),
        }
    }

    /// Parse through the companion parser
    pub fn parse(
        &self,
        text: &str,
        ctx: &PreprocessContext<'_>,
    ) -> Result<serde_json::Value, PluginError> {
        self.companion
            .as_ref()
            .ok_or(PluginError::MissingCompanion)?
            .parse(text, ctx)
    }

    /// Descriptor for the parser named `name`, if this plugin provides it
    pub fn parser(&self, name: &str) -> Option<ParserDescriptor<'_>> {
        (name == SVELTE_PARSER).then(|| ParserDescriptor {
            name: SVELTE_PARSER,
            ast_format: SVELTE_AST_FORMAT,
            plugin: self,
        })
    }

    /// All parsers this plugin provides
    pub fn parsers(&self) -> Vec<ParserDescriptor<'_>> {
        self.parser(SVELTE_PARSER).into_iter().collect()
    }
}

/// A parser as registered with the host: our preprocess in front of the
/// companion's parse.
#[derive(Clone, Copy)]
pub struct ParserDescriptor<'p> {
    pub name: &'static str,
    pub ast_format: &'static str,
    plugin: &'p SortImportsPlugin,
}

impl ParserDescriptor<'_> {
    pub fn preprocess(
        &self,
        source: &str,
        ctx: &PreprocessContext<'_>,
    ) -> Result<String, PluginError> {
        self.plugin.preprocess(source, ctx)
    }

    pub fn parse(
        &self,
        text: &str,
        ctx: &PreprocessContext<'_>,
    ) -> Result<serde_json::Value, PluginError> {
        self.plugin.parse(text, ctx)
    }
}

impl std::fmt::Debug for ParserDescriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserDescriptor")
            .field("name", &self.name)
            .field("ast_format", &self.ast_format)
            .field(
                "companion",
                &self.plugin.companion().map(|companion| companion.name()),
            )
            .finish()
    }
}

/// Compile `importOrderExclude` globs, failing on the first invalid one
pub fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>, PluginError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|err| PluginError::InvalidExcludePattern {
                pattern: pattern.clone(),
                message: err.msg.to_string(),
            })
        })
        .collect()
}

/// Whether `path` matches any of the exclusion globs
pub fn is_excluded(path: &Path, patterns: &[String]) -> Result<bool, PluginError> {
    Ok(compile_excludes(patterns)?
        .iter()
        .any(|pattern| pattern.matches_path(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordo_glyph::OrderingPolicy;
    use std::path::PathBuf;

    const DOCUMENT: &str = "<script>\nimport b from './b';\nimport a from 'a';\n</script>\n";
    const SORTED: &str = "<script>\nimport a from 'a';\nimport b from './b';\n</script>\n";

    struct FakeSvelte;

    impl CompanionPlugin for FakeSvelte {
        fn name(&self) -> &str {
            "fake-svelte"
        }

        fn preprocess(&self, text: String, _ctx: &PreprocessContext<'_>) -> Result<String, PluginError> {
            Ok(format!("{text}<!-- companion -->\n"))
        }

        fn parse(
            &self,
            text: &str,
            _ctx: &PreprocessContext<'_>,
        ) -> Result<serde_json::Value, PluginError> {
            Ok(serde_json::json!({ "type": "Root", "length": text.len() }))
        }
    }

    #[test]
    fn test_preprocess_sorts_svelte() {
        let policy = OrderingPolicy::default();
        let path = PathBuf::from("src/App.svelte");
        let ctx = PreprocessContext::new(Some(path.as_path()), &policy);

        let output = SortImportsPlugin::standalone().preprocess(DOCUMENT, &ctx).unwrap();
        assert_eq!(output, SORTED);
    }

    #[test]
    fn test_preprocess_skips_other_files() {
        let policy = OrderingPolicy::default();
        let plugin = SortImportsPlugin::standalone();

        let path = PathBuf::from("src/main.ts");
        let ctx = PreprocessContext::new(Some(path.as_path()), &policy);
        assert_eq!(plugin.preprocess(DOCUMENT, &ctx).unwrap(), DOCUMENT);

        let ctx = PreprocessContext::new(None, &policy);
        assert_eq!(plugin.preprocess(DOCUMENT, &ctx).unwrap(), DOCUMENT);
    }

    #[test]
    fn test_preprocess_runs_companion_after_sorting() {
        let policy = OrderingPolicy::default();
        let path = PathBuf::from("App.svelte");
        let ctx = PreprocessContext::new(Some(path.as_path()), &policy);

        let plugin = SortImportsPlugin::new(Some(Box::new(FakeSvelte)));
        let output = plugin.preprocess(DOCUMENT, &ctx).unwrap();
        assert_eq!(output, format!("{SORTED}<!-- companion -->\n"));
    }

    #[test]
    fn test_is_excluded() {
        let patterns = vec!["src/legacy/**".to_string(), "*.generated.svelte".to_string()];
        assert!(is_excluded(Path::new("src/legacy/Old.svelte"), &patterns).unwrap());
        assert!(is_excluded(Path::new("Icons.generated.svelte"), &patterns).unwrap());
        assert!(!is_excluded(Path::new("src/App.svelte"), &patterns).unwrap());
        assert!(!is_excluded(Path::new("src/App.svelte"), &[]).unwrap());
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let err = is_excluded(Path::new("a.svelte"), &["[".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            PluginError::InvalidExcludePattern { ref pattern, .. } if pattern == "["
        ));
    }

    #[test]
    fn test_parser_lookup() {
        let plugin = SortImportsPlugin::standalone();
        let parser = plugin.parser("svelte").unwrap();
        assert_eq!(parser.name, "svelte");
        assert_eq!(parser.ast_format, "svelte-ast");
        assert!(plugin.parser("babel").is_none());
        assert_eq!(plugin.parsers().len(), 1);
    }

    #[test]
    fn test_parse_delegates_to_companion() {
        let policy = OrderingPolicy::default();
        let ctx = PreprocessContext::new(None, &policy);
        let plugin = SortImportsPlugin::new(Some(Box::new(FakeSvelte)));

        let ast = plugin.parser(SVELTE_PARSER).unwrap().parse("<p />", &ctx).unwrap();
        assert_eq!(ast["type"], "Root");
        assert_eq!(ast["length"], 5);
    }
}
