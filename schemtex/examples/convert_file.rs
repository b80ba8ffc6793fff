//! Convert an editor export and print the CircuiTikZ document.

use schemtex::prelude::*;
use std::path::Path;

fn main() -> Result<(), SchemTexError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "export.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example convert_file [path/to/export.json]");
        std::process::exit(1);
    }

    let options = ConversionOptions {
        merge_collinear: true,
        ..Default::default()
    };

    let result = SchemTexCore::convert_file(path, &options)?;

    print!("{}", result.markup);
    eprintln!(
        "{} components, {} wires ({} split at component bodies)",
        result.stats.components, result.stats.output_wires, result.stats.splits
    );
    Ok(())
}
