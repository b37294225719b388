use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use finder2d::config::Config;
use finder2d::output::{self, OutputFormat};
use finder2d::{Finder, Matrix};

/// Finder2D: find a binary 2D pattern inside a larger binary 2D matrix.
///
/// Matrices are text files with one line per row and one character per
/// cell. Every option can also be set with a FINDER2D_* environment
/// variable (or a .env file); flags win over the environment.
#[derive(Parser)]
#[command(name = "finder2d", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Symbol flags shared by every subcommand that reads matrices.
#[derive(clap::Args)]
struct SymbolArgs {
    /// Matrix character that represents a one or on bit (default: "+")
    #[arg(long)]
    on: Option<String>,

    /// Matrix character that represents a zero or off bit (default: " ")
    #[arg(long)]
    off: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the target matrix in the source matrix and print the matches
    Search {
        /// Source (frame) matrix file
        #[arg(long)]
        source: Option<String>,

        /// Target (image) matrix file
        #[arg(long)]
        target: Option<String>,

        #[command(flatten)]
        symbols: SymbolArgs,

        /// Minimum matching percentage (default: 50)
        #[arg(short = 'p', long)]
        percentage: Option<f64>,

        /// Matches blurry delta: matches this close on both axes are merged (default: 1)
        #[arg(short = 'd', long)]
        delta: Option<usize>,

        /// Output format: json, text or matrix (default: json)
        #[arg(short = 'o', long)]
        output: Option<OutputFormat>,
    },

    /// Load a matrix file and print its size and contents
    Show {
        /// Matrix file to display
        #[arg(long)]
        matrix: String,

        #[command(flatten)]
        symbols: SymbolArgs,
    },

    /// Start the HTTP API, optionally preloading the source matrix
    #[cfg(feature = "web")]
    Serve {
        /// Source (frame) matrix file to preload
        #[arg(long)]
        source: Option<String>,

        #[command(flatten)]
        symbols: SymbolArgs,

        /// Port to listen on (default: 8080)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("finder2d=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load();

    match cli.command {
        Commands::Search {
            source,
            target,
            symbols,
            percentage,
            delta,
            output,
        } => {
            config.source = source.or(config.source);
            config.target = target.or(config.target);
            apply_symbols(&mut config, symbols);
            if let Some(p) = percentage {
                config.percentage = p;
            }
            if let Some(d) = delta {
                config.delta = d;
            }
            if let Some(o) = output {
                config.output = o;
            }

            let source_path = config
                .source
                .clone()
                .context("source file is required (--source or FINDER2D_SOURCE)")?;
            let target_path = config
                .target
                .clone()
                .context("target file is required (--target or FINDER2D_TARGET)")?;

            let mut finder = Finder::new(config.symbols()?, config.search_params()?);

            let source = open(&source_path, "frame")?;
            finder
                .load_source(source)
                .with_context(|| format!("fail to load the source file {source_path:?}"))?;
            let target = open(&target_path, "image")?;
            finder
                .load_target(target)
                .with_context(|| format!("fail to load the target file {target_path:?}"))?;

            if let (Some(s), Some(t)) = (finder.source(), finder.target()) {
                debug!(source = ?s.size(), target = ?t.size(), "matrices loaded");
            }

            let params = finder.params();
            info!(
                percentage = params.threshold,
                delta = params.delta,
                "searching target matrix"
            );
            finder
                .search()
                .context("failed to search the target matrix")?;
            info!(total = finder.matches().len(), "search complete");

            print_result(&finder, config.output);
        }

        Commands::Show { matrix, symbols } => {
            apply_symbols(&mut config, symbols);
            let symbols = config.symbols()?;

            let file = open(&matrix, "matrix")?;
            let loaded = Matrix::load(file, symbols)
                .with_context(|| format!("fail to load the matrix file {matrix:?}"))?;

            let name = Path::new(&matrix)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| matrix.clone());
            output::terminal::display_matrix(&name, &loaded);
        }

        #[cfg(feature = "web")]
        Commands::Serve {
            source,
            symbols,
            port,
            bind,
        } => {
            config.source = source.or(config.source);
            apply_symbols(&mut config, symbols);
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());

            let finder = preload_finder(&config)?;
            finder2d::web::run_server(finder, port, &bind).await?;
        }
    }

    Ok(())
}

fn apply_symbols(config: &mut Config, symbols: SymbolArgs) {
    if let Some(on) = symbols.on {
        config.on = on;
    }
    if let Some(off) = symbols.off {
        config.off = off;
    }
}

fn open(path: &str, what: &str) -> Result<File> {
    File::open(path).with_context(|| format!("fail to open the {what} file {path:?}"))
}

fn print_result(finder: &Finder, format: OutputFormat) {
    if format.is_matrix() {
        print!("{}", output::terminal::highlight(finder));
        output::terminal::display_matches(finder.matches());
    } else {
        println!("{}", finder.matches_json());
    }
}

/// Build the server's finder, loading the source matrix if one is configured.
#[cfg(feature = "web")]
fn preload_finder(config: &Config) -> Result<Finder> {
    use colored::Colorize;

    let mut finder = Finder::new(config.symbols()?, config.search_params()?);

    if let Some(path) = &config.source {
        let file = open(path, "frame")?;
        let matrix = finder
            .load_source(file)
            .with_context(|| format!("fail to load the source file {path:?}"))?;
        let (width, height) = matrix.size();
        info!(width, height, "source matrix preloaded");
        println!("{}", format!("Source matrix loaded ({width}x{height})").bold());
    }

    Ok(finder)
}
