//! Conversion pipeline shared by the CLI and library users.
//! read record → (merge) → normalize → emit → render

use std::path::{Path, PathBuf};

use crate::emitter::{render, Directive, DocumentMode, TikzEmitter};
use crate::geometry::{merge_collinear, Normalizer, DEFAULT_GRID_UNIT};
use crate::parser::json::{ParseError, SchematicParser};
use crate::parser::schema::{Orientation, Schematic};

#[derive(Debug, thiserror::Error)]
pub enum SchemTexError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

impl From<ParseError> for SchemTexError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Io(io) => SchemTexError::Io(io),
            other => SchemTexError::Parse(other.to_string()),
        }
    }
}

/// Options for a conversion run (CLI or library).
#[derive(Clone, Debug)]
pub struct ConversionOptions {
    /// Editor pixels per drawing unit.
    pub grid_unit: f64,
    /// Join touching collinear wires before normalizing.
    pub merge_collinear: bool,
    /// Cut wires at component bodies.
    pub normalize: bool,
    pub document: DocumentMode,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            grid_unit: DEFAULT_GRID_UNIT,
            merge_collinear: false,
            normalize: true,
            document: DocumentMode::Standalone,
        }
    }
}

impl ConversionOptions {
    fn validate(&self) -> Result<(), SchemTexError> {
        if !self.grid_unit.is_finite() || self.grid_unit <= 0.0 {
            return Err(SchemTexError::Other(format!(
                "Grid unit must be a positive number, got {}",
                self.grid_unit
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ConversionStats {
    pub components: usize,
    pub input_wires: usize,
    /// Wires removed by collinear merging.
    pub merged_wires: usize,
    pub splits: usize,
    pub diagonal_wires: usize,
    pub output_wires: usize,
}

/// Per-file conversion result.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Source file, if the record came from disk.
    pub file: Option<PathBuf>,
    pub directives: Vec<Directive>,
    pub markup: String,
    pub stats: ConversionStats,
}

impl ConversionResult {
    /// Where `convert_project` writes the markup: the source path with a
    /// `.tex` extension.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.file.as_ref().map(|f| f.with_extension("tex"))
    }
}

/// Recursively discover schematic export files (`*.json`) in a directory.
pub fn discover_schematic_files(dir: &Path) -> Result<Vec<PathBuf>, SchemTexError> {
    let mut files = Vec::new();
    walk_dir(dir, &mut files, 0)?;
    files.sort();
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>, depth: usize) -> Result<(), SchemTexError> {
    if depth > 20 {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with('.') || name == "node_modules" || name == "target" {
                continue;
            }
            walk_dir(&path, files, depth + 1)?;
        } else if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }
    Ok(())
}

/// Core conversion API used by the CLI.
pub struct SchemTexCore;

impl SchemTexCore {
    /// Convert an already parsed schematic.
    pub fn convert_schematic(
        schematic: &Schematic,
        options: &ConversionOptions,
    ) -> Result<ConversionResult, SchemTexError> {
        options.validate()?;

        let mut stats = ConversionStats {
            components: schematic.components.len(),
            input_wires: schematic.wires.len(),
            ..Default::default()
        };

        let wires = if options.merge_collinear {
            let merged = merge_collinear(&schematic.wires);
            stats.merged_wires = schematic.wires.len() - merged.len();
            merged
        } else {
            schematic.wires.clone()
        };

        let wires = if options.normalize {
            let (wires, report) = Normalizer::new(options.grid_unit)
                .normalize_with_report(&schematic.components, &wires);
            stats.splits = report.splits;
            stats.diagonal_wires = report.diagonal_wires;
            wires
        } else {
            stats.diagonal_wires = wires
                .iter()
                .filter(|w| w.orientation() == Orientation::Diagonal)
                .count();
            wires
        };
        stats.output_wires = wires.len();

        if stats.diagonal_wires > 0 {
            tracing::debug!(
                "{} diagonal wires drawn without normalization",
                stats.diagonal_wires
            );
        }

        let directives = TikzEmitter::new(options.grid_unit, options.document)
            .emit(&wires, &schematic.components);
        let markup = render(&directives);

        tracing::info!(
            "Converted {} components and {} wires ({} split) into {} directives",
            stats.components,
            stats.output_wires,
            stats.splits,
            directives.len()
        );

        Ok(ConversionResult {
            file: None,
            directives,
            markup,
            stats,
        })
    }

    /// Convert a JSON record held in memory.
    pub fn convert_str(
        content: &str,
        options: &ConversionOptions,
    ) -> Result<ConversionResult, SchemTexError> {
        let schematic = SchematicParser::parse_str(content)?;
        Self::convert_schematic(&schematic, options)
    }

    /// Convert a single export file.
    pub fn convert_file(
        path: &Path,
        options: &ConversionOptions,
    ) -> Result<ConversionResult, SchemTexError> {
        tracing::info!("Converting schematic: {}", path.display());
        let schematic = SchematicParser::parse_file(path)?;
        let mut result = Self::convert_schematic(&schematic, options)?;
        result.file = Some(path.to_path_buf());
        Ok(result)
    }

    /// Convert every export file in a directory and write each result next
    /// to its source as `<name>.tex`. Stops at the first failing file.
    pub fn convert_project(
        dir: &Path,
        options: &ConversionOptions,
    ) -> Result<Vec<ConversionResult>, SchemTexError> {
        let files = discover_schematic_files(dir)?;
        tracing::info!("Found {} schematic files in {}", files.len(), dir.display());

        let mut results = Vec::new();
        for path in files {
            let result = Self::convert_file(&path, options)?;
            if let Some(out) = result.output_path() {
                std::fs::write(&out, &result.markup)?;
            }
            results.push(result);
        }
        Ok(results)
    }
}
