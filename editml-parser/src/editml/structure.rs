//! Structural resolution
//!
//!     Move and copy markup link a source block to targets elsewhere in the document
//!     by tag. Resolving them needs the whole node list, so it happens here rather
//!     than while matching:
//!
//!     - [index]: the document-scoped tag index, which also detects the two conflicts
//!       that abort rendering (a reused source tag, a second move target).
//!     - [resolver]: renders blocks recursively and emits the Clean View.
//!
//!     Block content is re-parsed with the full pipeline. Structural markup is not
//!     supposed to nest, but nothing in the matcher prevents it, so recursion is bounded
//!     by [RenderOptions::max_nesting_depth](crate::editml::api::RenderOptions).

pub mod index;
pub mod resolver;

pub use index::StructuralIndex;
pub(crate) use resolver::resolve;
