use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use chrdlib::{
    parse_document, render_to_commands, render_to_svg_with_output, Diagnostic, DocumentMeta,
    DrawCommand, Line, RenderOutput, NEW_DOCUMENT,
};

#[derive(Parser)]
#[command(name = "chrd")]
#[command(about = "Render chord chart markup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Self-contained SVG document
    Svg,
    /// Render output and drawing commands as JSON
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Svg => ".svg",
            Format::Json => ".json",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a chart file
    Render {
        /// Path to the chart
        file: String,

        /// Render scale (1.0 = 425 units wide page)
        #[arg(short, long, default_value = "1.0")]
        scale: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "svg")]
        format: Format,

        /// Write to this file instead of stdout; a directory gets a file
        /// named after the chart title
        #[arg(short, long)]
        output: Option<String>,

        /// Name the output file after the chart title
        #[arg(short = 't', long)]
        title_name: bool,
    },
    /// Show how each line of a chart is classified and tokenized
    Tokens {
        /// Path to the chart
        file: String,
    },
    /// Print (or write) the template for a new chart
    New {
        /// File to create; refuses to overwrite
        file: Option<String>,
    },
}

#[derive(Serialize)]
struct CommandDump<'a> {
    output: &'a RenderOutput,
    commands: &'a [DrawCommand],
}

#[derive(Serialize)]
struct TokenDump<'a> {
    lines: &'a [Line],
    diagnostics: &'a [Diagnostic],
}

fn read_chart(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read chart '{path}'"))
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        eprintln!("warning: {d}");
    }
}

/// Where `chrd render` writes. `None` means stdout.
fn output_path(
    output: Option<&str>,
    title_name: bool,
    meta: &DocumentMeta,
    format: Format,
) -> Option<PathBuf> {
    let named = || meta.file_name(format.extension());
    match output {
        Some(path) if Path::new(path).is_dir() => Some(Path::new(path).join(named())),
        Some(path) => Some(PathBuf::from(path)),
        None if title_name => Some(PathBuf::from(named())),
        None => None,
    }
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            scale,
            format,
            output,
            title_name,
        } => {
            let text = read_chart(&file)?;
            match format {
                Format::Svg => {
                    let (svg, out) = render_to_svg_with_output(&text, scale)?;
                    print_diagnostics(&out.diagnostics);
                    let path = output_path(output.as_deref(), title_name, &out.meta, format);
                    emit(&svg, path.as_deref())
                }
                Format::Json => {
                    let (out, commands) = render_to_commands(&text, scale)?;
                    print_diagnostics(&out.diagnostics);
                    let dump = CommandDump {
                        output: &out,
                        commands: &commands,
                    };
                    let json = serde_json::to_string_pretty(&dump)?;
                    let path = output_path(output.as_deref(), title_name, &out.meta, format);
                    emit(&json, path.as_deref())
                }
            }
        }
        Commands::Tokens { file } => {
            let text = read_chart(&file)?;
            let (lines, diagnostics) = parse_document(&text);
            let dump = TokenDump {
                lines: &lines,
                diagnostics: &diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&dump)?);
            Ok(())
        }
        Commands::New { file } => match file {
            Some(path) => {
                if Path::new(&path).exists() {
                    bail!("'{path}' already exists");
                }
                emit(&format!("{NEW_DOCUMENT}\n"), Some(Path::new(&path)))
            }
            None => {
                println!("{NEW_DOCUMENT}");
                Ok(())
            }
        },
    }
}
