//! Configuration file loading for ordo.
//!
//! Reads `ordo.config.json` from the current working directory, or from an
//! explicit path. The file holds the same `importOrder*` keys the host
//! formatter accepts.

use ordo_glyph::OrderingPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE: &str = "ordo.config.json";

/// Top-level ordo configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OrdoConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Import ordering options.
    #[serde(flatten)]
    pub policy: OrderingPolicy,
}

/// Load the configuration.
///
/// An explicit `path` is used as is; otherwise `ordo.config.json` is looked
/// up in the current directory. A missing file yields the defaults, and so
/// does a file that cannot be read or parsed (with a warning).
pub fn load_config(path: Option<&Path>) -> OrdoConfig {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path(),
    };

    if !config_path.exists() {
        if path.is_some() {
            eprintln!(
                "\x1b[33mWarning:\x1b[0m Config file {} not found, using defaults",
                config_path.display()
            );
        }
        return OrdoConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => {
                tracing::debug!("loaded {}", config_path.display());
                config
            }
            Err(e) => {
                eprintln!(
                    "\x1b[33mWarning:\x1b[0m Failed to parse {}: {}",
                    config_path.display(),
                    e
                );
                OrdoConfig::default()
            }
        },
        Err(e) => {
            eprintln!(
                "\x1b[33mWarning:\x1b[0m Failed to read {}: {}",
                config_path.display(),
                e
            );
            OrdoConfig::default()
        }
    }
}

#[inline]
fn parse_config(content: &str) -> serde_json::Result<OrdoConfig> {
    serde_json::from_str(content)
}

fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_default()
        .join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = parse_config(
            r#"{
                "$schema": "./node_modules/.ordo/ordo.config.schema.json",
                "importOrder": ["^svelte", "<THIRD_PARTY_MODULES>", "<LOCAL_MODULES>"],
                "importOrderSeparation": true,
                "importOrderExclude": ["src/generated/**"]
            }"#,
        )
        .unwrap();

        assert!(config.schema.is_some());
        assert_eq!(config.policy.import_order.len(), 3);
        assert!(config.policy.import_order_separation);
        assert!(!config.policy.import_order_sort_specifiers);
        assert_eq!(config.policy.import_order_parser_plugins, ["typescript", "jsx"]);
        assert_eq!(config.policy.import_order_exclude, ["src/generated/**"]);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config.policy, OrderingPolicy::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(parse_config(r#"{ "importOrder": true }"#).is_err());
        assert!(parse_config("not json").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = load_config(Some(Path::new("/nonexistent/ordo.config.json")));
        assert_eq!(config.policy, OrderingPolicy::default());
    }
}
