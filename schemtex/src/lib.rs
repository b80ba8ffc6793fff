//! SchemTeX - schematic editor export to CircuiTikZ converter
//!
//! This library reads the JSON record exported by the schematic editor
//! (components plus axis-aligned wires on a pixel grid) and writes a
//! CircuiTikZ drawing of it. Wires that run through a component body are cut
//! at the body's edge so the component symbol is not overdrawn.
//!
//! # Quick Start
//!
//! ```no_run
//! use schemtex::{ConversionOptions, SchemTexCore};
//! use std::path::Path;
//!
//! let result = SchemTexCore::convert_file(
//!     Path::new("export.json"),
//!     &ConversionOptions::default(),
//! ).unwrap();
//!
//! print!("{}", result.markup);
//! ```
//!
//! # Features
//!
//! - **Wire normalization**: wires crossing a component are split at its body
//! - **Collinear merging**: optional joining of touching wire segments
//! - **Standalone or fragment output**: full document or bare environment

pub mod core;
pub mod emitter;
pub mod geometry;
pub mod parser;

// Re-export main types
pub use crate::core::{
    discover_schematic_files, ConversionOptions, ConversionResult, ConversionStats,
    SchemTexCore, SchemTexError,
};
pub use emitter::{render, Directive, DocumentMode, TikzEmitter};
pub use geometry::{is_on_wire, merge_collinear, split, Normalizer};
pub use parser::schema::{Component, ComponentKind, Schematic, Wire};
pub use parser::json::SchematicParser;

/// Parse an export file (convenience wrapper).
pub fn parse_schematic(path: &std::path::Path) -> Result<Schematic, SchemTexError> {
    Ok(SchematicParser::parse_file(path)?)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ConversionOptions, ConversionResult, ConversionStats, DocumentMode, SchemTexCore,
        SchemTexError,
    };
}
