//! tab2html CLI - LaTeX tabular to HTML table converter

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use tabulax::{latex_to_grid, latex_to_html_with_diagnostics, ConversionWarning};

/// Extensions picked up by `batch` when none are given
#[cfg(feature = "cli")]
const DEFAULT_EXTENSIONS: &[&str] = &["txt", "tex", "mmd"];

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tab2html")]
#[command(version)]
#[command(about = "Tabulax - LaTeX tabular to HTML table converter", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Print the placement grid as JSON instead of HTML
    #[arg(long)]
    grid: bool,

    /// Strict mode: exit with error if any conversion warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored warning output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert every prediction file in a directory
    Batch {
        /// Input directory or single file
        input: String,

        /// Output directory for `<stem>.html` files
        #[arg(short, long)]
        output_dir: String,

        /// File extensions to convert (default: txt, tex, mmd)
        #[arg(short, long = "extension")]
        extensions: Vec<String>,
    },

    /// Show version and supported constructs
    Info,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    let input = read_input(cli.input_file.as_deref())?;

    if cli.grid {
        let grid = match latex_to_grid(&input) {
            Ok(grid) => grid,
            Err(err) => {
                eprintln!("✗ No result: {}", err);
                std::process::exit(1);
            }
        };
        let json = serde_json::to_string_pretty(&grid).map_err(io::Error::other)?;
        return write_output(cli.output.as_deref(), &json);
    }

    let output = match latex_to_html_with_diagnostics(&input) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("✗ No result: {}", err);
            std::process::exit(1);
        }
    };

    // Print warnings to stderr (unless quiet mode)
    if !cli.quiet && output.has_warnings() {
        print_warnings_to_stderr(&output.warnings, !cli.no_color);
    }

    // Check strict mode
    if cli.strict && output.has_warnings() {
        eprintln!(
            "Error: {} conversion warning(s) in strict mode",
            output.warnings.len()
        );
        std::process::exit(1);
    }

    write_output(cli.output.as_deref(), &output.content)
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", content)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Batch {
            input,
            output_dir,
            extensions,
        } => {
            // Create output directory if it doesn't exist
            fs::create_dir_all(&output_dir)?;

            let extensions: Vec<String> = if extensions.is_empty() {
                DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
            } else {
                extensions
            };

            let files = collect_inputs(Path::new(&input), &extensions)?;
            let started = Instant::now();

            let mut converted = 0;
            let mut no_result = 0;
            let mut error_count = 0;

            for file_path in &files {
                let stem = file_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                let output_path = Path::new(&output_dir).join(format!("{}.html", stem));

                let content = match fs::read_to_string(file_path) {
                    Ok(content) => content,
                    Err(e) => {
                        eprintln!("✗ {} - read error: {}", file_path.display(), e);
                        error_count += 1;
                        continue;
                    }
                };

                match latex_to_html_with_diagnostics(&content) {
                    Ok(output) => match fs::write(&output_path, &output.content) {
                        Ok(_) => {
                            if output.has_warnings() {
                                eprintln!(
                                    "⚠ {} ({} warning(s))",
                                    output_path.display(),
                                    output.warnings.len()
                                );
                            } else {
                                eprintln!("✓ {}", output_path.display());
                            }
                            converted += 1;
                        }
                        Err(e) => {
                            eprintln!("✗ {} - write error: {}", output_path.display(), e);
                            error_count += 1;
                        }
                    },
                    Err(err) => {
                        eprintln!("- {} - no result: {}", file_path.display(), err);
                        no_result += 1;
                    }
                }
            }

            let elapsed = started.elapsed().as_secs_f64();
            eprintln!(
                "\nBatch conversion complete: {} converted, {} without result, {} failed",
                converted, no_result, error_count
            );
            if !files.is_empty() {
                eprintln!(
                    "Total time: {:.2} seconds ({:.4} seconds per file)",
                    elapsed,
                    elapsed / files.len() as f64
                );
            }

            if error_count > 0 {
                std::process::exit(1);
            }
        }

        Commands::Info => {
            println!("Tabulax - LaTeX tabular to HTML table converter");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Supported constructs:");
            println!("  ✓ \\multirow{{n}}{{width}}{{text}} and \\multicolumn{{n}}{{spec}}{{text}}");
            println!("  ✓ Escaped separators (\\&) and comments (%)");
            println!("  ✓ \\hline, \\cline, \\cdashline, \\toprule, \\midrule, \\bottomrule, \\cmidrule");
            println!("  ✓ \\tabularnewline and \\\\[<len>] spacing hints");
            println!();
            println!("Not interpreted (passed through as cell text):");
            println!("  - math, font and color commands");
            println!("  - nested tabular environments");
            println!("  - column format specifications");
            println!();
        }
    }

    Ok(())
}

/// Files under `input` with one of `extensions`, sorted; `input` itself if it
/// is a file
#[cfg(feature = "cli")]
fn collect_inputs(input: &Path, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| {
            let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
            path.is_file() && extensions.iter().any(|e| e == ext)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Print warnings to stderr with optional color coding.
#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[ConversionWarning], use_color: bool) {
    let (yellow, reset) = if use_color {
        ("\x1b[33m", "\x1b[0m")
    } else {
        ("", "")
    };

    eprintln!();
    eprintln!("{}Conversion Warnings ({}):{}", yellow, warnings.len(), reset);
    eprintln!();
    for warning in warnings {
        eprintln!("  {}[warning]{} {}", yellow, reset, warning);
    }
    eprintln!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install tabulax --features cli");
    eprintln!("  tab2html [OPTIONS] [INPUT_FILE]");
}
