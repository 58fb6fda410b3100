//! Carton - The toolbox shared by every ordo crate.
//!
//! Holds the small pieces of text bookkeeping that the import sorter and the
//! Svelte region adapter both rely on:
//!
//! - **Span**: half-open byte ranges into a source buffer
//! - **Text helpers**: line boundaries, indentation and blank-line trimming
//! - **Hash maps**: `rustc-hash` re-exports for attribute tables
//!
//! # Example
//!
//! ```
//! use ordo_carton::{Span, text};
//!
//! let source = "\n\timport a from 'a';";
//! let span = Span::new(2, source.len());
//! assert_eq!(span.slice(source), "import a from 'a';");
//! assert_eq!(text::indent_before(source, span.start), "\t");
//! ```

mod span;
pub mod text;

pub use span::Span;

// Re-export rustc-hash for fast hash maps
pub use rustc_hash::FxHashMap;
