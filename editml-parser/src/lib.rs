//! # editml-parser
//!
//! A parser for EditML, a plaintext editorial markup format, and the renderer
//! that resolves its edits into a Clean View.
//!
//! File Layout
//!
//! The pipeline runs leaves first, and the module tree follows it:
//! src/editml
//!   ├── comments     `%%` debug-comment stripping with a line map
//!   ├── escapes      Backslash escape decoding, per markup kind
//!   ├── matching     Per-kind span searches over raw text
//!   ├── overlap      Interleaving candidates with text, discarding overlaps
//!   ├── ast          Node model, ranges, issues and errors
//!   ├── structure    Move/copy tag index and resolution
//!   ├── rendering    Clean View and Markup View
//!   └── formats      Treeviz and JSON dumps of a node list
//!
//! The public entry points live in [editml::api]: [parse](editml::api::parse) and
//! [render_clean_view](editml::api::render_clean_view).
//!
//! For test helpers, see the [testing module](editml::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod editml;

pub use editml::api::{
    parse, parse_with, render_clean_view, render_clean_view_with, render_markup_view, ParseOptions,
    RenderOptions,
};
pub use editml::ast::{Document, Issue, Node, StructuralError};
pub use editml::rendering::Rendered;
