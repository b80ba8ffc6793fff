//! SchemTeX CLI - convert schematic editor exports to CircuiTikZ from the command line.

use clap::{Args, Parser, Subcommand, ValueEnum};
use schemtex::emitter::Primitive;
use schemtex::{
    ComponentKind, ConversionOptions, ConversionResult, DocumentMode, SchemTexCore, SchemTexError,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "schemtex")]
#[command(about = "Schematic editor export to CircuiTikZ converter", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single export file
    Convert {
        /// Path to the exported .json record (use "-" for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the markup to this file instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "tex")]
        format: OutputFormat,

        #[command(flatten)]
        conversion: ConversionArgs,
    },

    /// Convert every .json export in a directory, writing .tex files beside them
    Project {
        /// Path to project directory
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Output format for the summary
        #[arg(short, long, value_enum, default_value = "human")]
        format: SummaryFormat,

        #[command(flatten)]
        conversion: ConversionArgs,
    },

    /// List component types and the CircuiTikZ primitives they map to
    Primitives {
        /// Show units and body sizes
        #[arg(short, long)]
        long: bool,
    },
}

#[derive(Args, Clone)]
struct ConversionArgs {
    /// Editor pixels per drawing unit
    #[arg(long, default_value_t = schemtex::geometry::DEFAULT_GRID_UNIT)]
    grid_unit: f64,

    /// Join touching collinear wires before splitting
    #[arg(long)]
    merge_collinear: bool,

    /// Keep wires running through component bodies
    #[arg(long)]
    no_normalize: bool,

    /// Emit only the circuitikz environment
    #[arg(long)]
    fragment: bool,
}

impl ConversionArgs {
    fn to_options(&self) -> ConversionOptions {
        ConversionOptions {
            grid_unit: self.grid_unit,
            merge_collinear: self.merge_collinear,
            normalize: !self.no_normalize,
            document: if self.fragment {
                DocumentMode::Fragment
            } else {
                DocumentMode::Standalone
            },
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// CircuiTikZ markup
    Tex,
    /// JSON with markup and conversion statistics
    Json,
}

#[derive(Clone, ValueEnum)]
enum SummaryFormat {
    /// Human-readable summary
    Human,
    /// JSON summary
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Convert {
            file,
            output,
            format,
            conversion,
        } => handle_convert(&file, output.as_deref(), format, &conversion.to_options()),
        Commands::Project {
            dir,
            format,
            conversion,
        } => handle_project(&dir, format, &conversion.to_options()),
        Commands::Primitives { long } => {
            handle_primitives(long);
            0
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_convert(
    file: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    options: &ConversionOptions,
) -> i32 {
    match convert_input(file, options) {
        Ok(result) => {
            let text = match format {
                OutputFormat::Tex => result.markup.clone(),
                OutputFormat::Json => format!("{}\n", result_json(&result)),
            };
            match output {
                Some(path) => {
                    if let Err(e) = std::fs::write(path, text) {
                        eprintln!("Error: failed to write {}: {}", path.display(), e);
                        return 1;
                    }
                    tracing::info!("Wrote {}", path.display());
                }
                None => print!("{}", text),
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn convert_input(
    file: &Path,
    options: &ConversionOptions,
) -> Result<ConversionResult, SchemTexError> {
    if file.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        SchemTexCore::convert_str(&buffer, options)
    } else {
        SchemTexCore::convert_file(file, options)
    }
}

fn handle_project(dir: &Path, format: SummaryFormat, options: &ConversionOptions) -> i32 {
    match SchemTexCore::convert_project(dir, options) {
        Ok(results) => {
            match format {
                SummaryFormat::Human => output_human(&results),
                SummaryFormat::Json => output_json(&results),
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn result_json(result: &ConversionResult) -> serde_json::Value {
    serde_json::json!({
        "file": result.file.as_ref().map(|f| f.display().to_string()),
        "stats": result.stats,
        "markup": result.markup,
    })
}

fn output_human(results: &[ConversionResult]) {
    if results.is_empty() {
        println!("No schematic exports found");
        return;
    }
    for result in results {
        let file = result
            .file
            .as_ref()
            .map(|f| f.display().to_string())
            .unwrap_or_else(|| "<stdin>".to_string());
        println!("\nFile: {}", file);
        println!("{}", "─".repeat(60));
        if let Some(out) = result.output_path() {
            println!("  Output:     {}", out.display());
        }
        println!("  Components: {}", result.stats.components);
        println!(
            "  Wires:      {} in, {} out",
            result.stats.input_wires, result.stats.output_wires
        );
        println!("  Splits:     {}", result.stats.splits);
        if result.stats.merged_wires > 0 {
            println!("  Merged:     {}", result.stats.merged_wires);
        }
        if result.stats.diagonal_wires > 0 {
            println!("  Diagonal:   {} (not normalized)", result.stats.diagonal_wires);
        }
    }
}

fn output_json(results: &[ConversionResult]) {
    let output = serde_json::json!({
        "results": results.iter().map(|r| {
            serde_json::json!({
                "file": r.file.as_ref().map(|f| f.display().to_string()),
                "output": r.output_path().map(|f| f.display().to_string()),
                "stats": r.stats,
            })
        }).collect::<Vec<_>>(),
        "summary": {
            "total_files": results.len(),
            "total_splits": results.iter().map(|r| r.stats.splits).sum::<usize>(),
        }
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn handle_primitives(long: bool) {
    println!("Component types and CircuiTikZ primitives:\n");

    let kinds = [
        ComponentKind::VoltageSource,
        ComponentKind::CurrentSource,
        ComponentKind::Resistor,
        ComponentKind::Generic("(other)".to_string()),
    ];

    for kind in &kinds {
        let primitive = Primitive::for_kind(kind);
        println!("  {}", kind);
        println!("    {}", primitive.name());
        if long {
            let unit = primitive.unit().map(|u| u.macro_name()).unwrap_or("none");
            println!("    unit: {}, half-extent: {}", unit, kind.half_extent());
            if primitive.has_polarity() {
                println!("    inverted at 180 and 270 degrees");
            }
        }
        println!();
    }
}
