//! Host-facing behaviour of the sort-imports plugin.

use ordo_glyph::OrderingPolicy;
use ordo_vitrine::{
    compile_excludes, options_json_schema, CompanionPlugin, PluginError, PreprocessContext,
    SortImportsPlugin, COMPANION_PACKAGE,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const COMPONENT: &str = r#"<script lang="ts">
  import Card from '$lib/Card.svelte';
  import { onMount } from 'svelte';
  import { api } from './api';
</script>

<Card />
"#;

fn policy() -> OrderingPolicy {
    OrderingPolicy {
        import_order: vec![
            "^svelte".to_string(),
            "^\\$lib/".to_string(),
            "<LOCAL_MODULES>".to_string(),
        ],
        import_order_separation: true,
        import_order_exclude: vec!["src/vendor/**".to_string()],
        ..Default::default()
    }
}

/// Companion that counts how often the host reaches it
struct CountingCompanion {
    calls: Arc<AtomicUsize>,
}

impl CompanionPlugin for CountingCompanion {
    fn name(&self) -> &str {
        "counting-companion"
    }

    fn parse(
        &self,
        _text: &str,
        _ctx: &PreprocessContext<'_>,
    ) -> Result<serde_json::Value, PluginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PluginError::Companion("unexpected token".to_string()))
    }
}

#[test]
fn sorts_component_through_descriptor() {
    let plugin = SortImportsPlugin::standalone();
    let policy = policy();
    let ctx = PreprocessContext::new(Some(Path::new("src/routes/+page.svelte")), &policy);

    let parser = plugin.parser("svelte").unwrap();
    insta::assert_snapshot!(parser.preprocess(COMPONENT, &ctx).unwrap(), @r###"
<script lang="ts">
  import { onMount } from 'svelte';

  import Card from '$lib/Card.svelte';

  import { api } from './api';
</script>

<Card />
"###);
}

#[test]
fn excluded_component_is_unchanged() {
    let plugin = SortImportsPlugin::standalone();
    let policy = policy();
    let ctx = PreprocessContext::new(Some(Path::new("src/vendor/Widget.svelte")), &policy);

    assert_eq!(plugin.preprocess(COMPONENT, &ctx).unwrap(), COMPONENT);
}

#[test]
fn invalid_exclude_pattern_does_not_block_sorting() {
    let plugin = SortImportsPlugin::standalone();
    let policy = OrderingPolicy {
        import_order_exclude: vec!["src/[".to_string()],
        ..policy()
    };
    let ctx = PreprocessContext::new(Some(Path::new("src/App.svelte")), &policy);

    let output = plugin.preprocess(COMPONENT, &ctx).unwrap();
    assert!(output.contains("import { onMount } from 'svelte';\n\n  import Card"));

    let err = compile_excludes(&policy.import_order_exclude).unwrap_err();
    assert!(err.to_string().starts_with("Invalid exclude pattern `src/[`"));
}

#[test]
fn parse_without_companion_explains_install() {
    let plugin = SortImportsPlugin::standalone();
    let policy = policy();
    let ctx = PreprocessContext::new(Some(Path::new("App.svelte")), &policy);

    let err = plugin.parser("svelte").unwrap().parse(COMPONENT, &ctx).unwrap_err();
    assert!(matches!(err, PluginError::MissingCompanion));

    let message = err.to_string();
    assert!(message.contains(COMPANION_PACKAGE));
    assert!(message.contains("npm install -D prettier-plugin-svelte"));
}

#[test]
fn preprocess_without_companion_still_sorts() {
    let plugin = SortImportsPlugin::standalone();
    assert!(plugin.companion().is_none());

    let policy = policy();
    let ctx = PreprocessContext::new(Some(Path::new("App.svelte")), &policy);
    let output = plugin.preprocess(COMPONENT, &ctx).unwrap();
    assert_ne!(output, COMPONENT);
}

#[test]
fn companion_errors_pass_through() {
    let calls = Arc::new(AtomicUsize::new(0));
    let plugin = SortImportsPlugin::new(Some(Box::new(CountingCompanion {
        calls: Arc::clone(&calls),
    })));
    let policy = policy();
    let ctx = PreprocessContext::new(Some(Path::new("App.svelte")), &policy);

    // default companion preprocess is the identity
    let sorted = plugin.preprocess(COMPONENT, &ctx).unwrap();
    assert!(sorted.contains("import { onMount } from 'svelte';\n\n  import Card"));

    let err = plugin.parse(&sorted, &ctx).unwrap_err();
    assert_eq!(err.to_string(), "Companion plugin failed: unexpected token");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn schema_describes_config_file() {
    let schema = options_json_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(
        schema["properties"]["importOrderParserPlugins"]["default"],
        serde_json::json!(["typescript", "jsx"])
    );
}
