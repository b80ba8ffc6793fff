//! Reader for the schematic editor's JSON export.
//!
//! The record holds two collections, `components` and `wires`. Anything
//! missing from them is a fatal error; there is no partial result.

use std::path::Path;
use thiserror::Error;

use super::schema::Schematic;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed schematic record: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct SchematicParser;

impl SchematicParser {
    pub fn parse_file(path: &Path) -> Result<Schematic, ParseError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> Result<Schematic, ParseError> {
        let mut schematic: Schematic = serde_json::from_str(content)?;

        // Wires without an id get the editor's own naming scheme
        for (idx, wire) in schematic.wires.iter_mut().enumerate() {
            if wire.id.is_empty() {
                wire.id = format!("wire-{}", idx);
            }
        }

        for component in &schematic.components {
            if let crate::parser::ComponentKind::Generic(name) = &component.kind {
                tracing::debug!(
                    "Component {} has unknown type {:?}, drawing it as generic",
                    component.id,
                    name
                );
            }
        }

        tracing::debug!(
            "Parsed schematic record with {} components and {} wires",
            schematic.components.len(),
            schematic.wires.len()
        );
        Ok(schematic)
    }
}
