//! The companion Svelte plugin seam.

use ordo_glyph::OrderingPolicy;
use std::path::Path;

use crate::error::PluginError;

/// What the host passes along with a file
#[derive(Debug, Clone, Copy)]
pub struct PreprocessContext<'a> {
    /// Path of the file being formatted, when the host knows it
    pub filepath: Option<&'a Path>,
    pub policy: &'a OrderingPolicy,
}

impl<'a> PreprocessContext<'a> {
    pub fn new(filepath: Option<&'a Path>, policy: &'a OrderingPolicy) -> Self {
        Self { filepath, policy }
    }
}

/// A plugin that knows how to parse Svelte documents.
///
/// The host formatter owns the real implementation; ordo only runs its own
/// preprocess step in front of it.
pub trait CompanionPlugin: Send + Sync {
    /// Package name, for diagnostics
    fn name(&self) -> &str;

    /// The companion's own preprocess step. Identity by default.
    fn preprocess(&self, text: String, _ctx: &PreprocessContext<'_>) -> Result<String, PluginError> {
        Ok(text)
    }

    /// Parse a Svelte document into the companion's AST
    fn parse(
        &self,
        text: &str,
        ctx: &PreprocessContext<'_>,
    ) -> Result<serde_json::Value, PluginError>;
}
