//! Vitrine - The display case for ordo.
//!
//! The surface a host formatter sees: a preprocess hook that sorts imports
//! in Svelte components, a `svelte` parser descriptor that hands parsing to
//! the companion plugin, and the option schema.
//!
//! ```
//! use ordo_glyph::OrderingPolicy;
//! use ordo_vitrine::{PluginError, PreprocessContext, SortImportsPlugin};
//!
//! let plugin = SortImportsPlugin::standalone();
//! let policy = OrderingPolicy::default();
//! let ctx = PreprocessContext::new(None, &policy);
//!
//! let parser = plugin.parser("svelte").unwrap();
//! assert!(matches!(parser.parse("<p />", &ctx), Err(PluginError::MissingCompanion)));
//! ```

mod companion;
mod error;
mod options;
mod plugin;

pub use companion::*;
pub use error::*;
pub use options::*;
pub use plugin::*;
