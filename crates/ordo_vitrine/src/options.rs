//! Options the plugin registers with the host formatter.

use ordo_glyph::OrderingPolicy;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Value type of an option, as the host understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Boolean,
    Path,
}

/// Where the host lists an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionCategory {
    Global,
}

/// A single registered option
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDescriptor {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionType,
    pub category: OptionCategory,
    pub array: bool,
    pub default: Value,
    pub description: &'static str,
}

impl OptionDescriptor {
    fn boolean(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: OptionType::Boolean,
            category: OptionCategory::Global,
            array: false,
            default: Value::Bool(false),
            description,
        }
    }

    fn paths(name: &'static str, default: &[String], description: &'static str) -> Self {
        Self {
            name,
            kind: OptionType::Path,
            category: OptionCategory::Global,
            array: true,
            default: json!(default),
            description,
        }
    }
}

/// The options schema: one descriptor per `importOrder*` option.
///
/// Defaults are taken from [`OrderingPolicy::default`].
pub fn options() -> Vec<OptionDescriptor> {
    let defaults = OrderingPolicy::default();
    vec![
        OptionDescriptor::paths(
            "importOrder",
            &defaults.import_order,
            "Provide an order to sort imports. Use regex patterns to match import paths.",
        ),
        OptionDescriptor::boolean(
            "importOrderSeparation",
            "Should imports be separated by blank lines between groups?",
        ),
        OptionDescriptor::boolean(
            "importOrderCaseInsensitive",
            "Should import sorting be case insensitive?",
        ),
        OptionDescriptor::boolean(
            "importOrderSortSpecifiers",
            "Should import specifiers be sorted alphabetically?",
        ),
        OptionDescriptor::boolean(
            "importOrderGroupNamespaceSpecifiers",
            "Should namespace imports (import * as) be grouped at the top?",
        ),
        OptionDescriptor::paths(
            "importOrderParserPlugins",
            &defaults.import_order_parser_plugins,
            "Parser plugins for special syntax (e.g., typescript, jsx)",
        ),
        OptionDescriptor::paths(
            "importOrderExclude",
            &defaults.import_order_exclude,
            "File patterns to exclude from import sorting",
        ),
    ]
}

/// Render [`options`] as a JSON Schema document for `ordo.config.json`
pub fn options_json_schema() -> Value {
    let mut properties = Map::new();
    properties.insert(
        "$schema".to_string(),
        json!({ "type": "string", "description": "JSON Schema reference" }),
    );

    for option in options() {
        let schema = match option.kind {
            OptionType::Boolean => json!({
                "type": "boolean",
                "default": option.default,
                "description": option.description,
            }),
            OptionType::Path => json!({
                "type": "array",
                "items": { "type": "string" },
                "default": option.default,
                "description": option.description,
            }),
        };
        properties.insert(option.name.to_string(), schema);
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "ordo configuration",
        "description": "Import ordering options for ordo",
        "type": "object",
        "properties": properties,
        "additionalProperties": false,
    })
}
