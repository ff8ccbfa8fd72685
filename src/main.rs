use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;

use bubbl2struct::config::{load_config, save_config, ExtractorConfig};
use bubbl2struct::converter::Converter;
use bubbl2struct::errors::ConceptMapError;
use bubbl2struct::formatter::{format_graph_as_text, format_matrix_as_json, format_matrix_as_text};
use bubbl2struct::projection::MatrixProjector;
use bubbl2struct::types::{AdjacencyMatrix, Graph};

/// Converts bubbl.us concept maps into structured formats.
#[derive(Parser)]
#[command(name = "bubbl2struct", about = "Converts bubbl.us concept maps into structured formats")]
struct Cli {
    /// Extractor configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log extraction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the concept map as a JSON graph
    Json {
        /// Exported bubbl.us HTML file
        file: PathBuf,
        /// Indent the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print the concept map as an adjacency matrix
    Adj {
        /// Exported bubbl.us HTML file
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: MatrixFormat,
    },
    /// Project a previously exported JSON graph onto an adjacency matrix
    Project {
        /// JSON graph file
        graph: PathBuf,
        /// Id of the graph's first node
        #[arg(long, default_value = "0")]
        id_base: usize,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: MatrixFormat,
    },
    /// Print each concept with its links
    Show {
        /// Exported bubbl.us HTML file
        file: PathBuf,
    },
    /// Write the default bubbl.us markup conventions to a config file
    InitConfig {
        /// Where to write the configuration
        path: PathBuf,
        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MatrixFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> bubbl2struct::errors::Result<()> {
    match cli.command {
        Commands::Json { file, pretty } => {
            let converter = Converter::open(&file, resolve_config(cli.config.as_deref())?)?;
            let graph = converter.to_graph()?;
            if pretty {
                println!("{}", graph.to_json_pretty()?);
            } else {
                println!("{}", graph.to_json()?);
            }
        }
        Commands::Adj { file, format } => {
            let converter = Converter::open(&file, resolve_config(cli.config.as_deref())?)?;
            let matrix = converter.to_adjacency()?;
            print_matrix(&matrix, format);
        }
        Commands::Project {
            graph,
            id_base,
            format,
        } => {
            let json = std::fs::read_to_string(&graph)?;
            let graph = Graph::from_json(&json)?;
            let matrix = MatrixProjector::with_id_base(id_base).project(&graph)?;
            print_matrix(&matrix, format);
        }
        Commands::Show { file } => {
            let converter = Converter::open(&file, resolve_config(cli.config.as_deref())?)?;
            print!("{}", format_graph_as_text(&converter.to_graph()?));
        }
        Commands::InitConfig { path, force } => {
            if path.exists() && !force {
                return Err(ConceptMapError::Config {
                    message: format!(
                        "'{}' already exists (use --force to replace it)",
                        path.display()
                    ),
                });
            }
            save_config(&path, &ExtractorConfig::default())?;
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}

fn print_matrix(matrix: &AdjacencyMatrix, format: MatrixFormat) {
    match format {
        MatrixFormat::Text => print!("{}", format_matrix_as_text(matrix)),
        MatrixFormat::Json => println!("{}", format_matrix_as_json(matrix)),
    }
}

/// Loads the configuration file if one was given, else the bubbl.us defaults.
fn resolve_config(path: Option<&Path>) -> bubbl2struct::errors::Result<ExtractorConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(ExtractorConfig::default()),
    }
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
