//! Error types for the ordo host integration.

use thiserror::Error;

/// Package that provides the Svelte parser
pub const COMPANION_PACKAGE: &str = "prettier-plugin-svelte";

/// Errors surfaced to the host formatter
#[derive(Debug, Error)]
pub enum PluginError {
    /// A Svelte parse was requested but no companion parser is installed
    #[error(
        "prettier-plugin-svelte is required but not found. Please install it: npm install -D prettier-plugin-svelte"
    )]
    MissingCompanion,

    /// The companion plugin reported an error
    #[error("Companion plugin failed: {0}")]
    Companion(String),

    /// An `importOrderExclude` entry is not a valid glob
    #[error("Invalid exclude pattern `{pattern}`: {message}")]
    InvalidExcludePattern { pattern: String, message: String },
}
