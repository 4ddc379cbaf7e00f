//! # Site Assets - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Costruzione della configurazione (default, file JSON, flag CLI)
//! - Avvio del mirroring o dello spostamento in `public/`
//!
//! ## Flusso di esecuzione (`compress`):
//! 1. Carica il file di configurazione, se indicato
//! 2. Applica gli override da CLI e valida
//! 3. Istanzia `DirectoryMirror` e avvia il traversal
//! 4. Exit code non-zero se la sorgente manca o un file è fallito
//!
//! ## Esempio di utilizzo:
//! ```bash
//! site-assets compress --source images --dest compressed_images --quality 80
//! site-assets relocate --root .
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use site_assets::json_output::JsonMessage;
use site_assets::relocate::{relocate_static_files, DEFAULT_PUBLIC_DIR};
use site_assets::{Config, DirectoryMirror};

#[derive(Parser)]
#[command(name = "site-assets")]
#[command(about = "Static site asset tools: mirror-and-compress images, relocate files into public/")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mirror a directory tree, recompressing images and copying everything else
    Compress(CompressArgs),
    /// Move css/, js/, images/, products/ and index.html into the public directory
    Relocate(RelocateArgs),
}

#[derive(Args)]
struct CompressArgs {
    /// JSON configuration file (missing file means defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to read from [default: images]
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Directory to write the mirror into [default: compressed_images]
    #[arg(short, long)]
    dest: Option<PathBuf>,

    /// Maximum length in pixels of the longer image edge [default: 1200]
    #[arg(short = 'w', long)]
    max_width: Option<u32>,

    /// JPEG quality (1-100) [default: 80]
    #[arg(short, long)]
    quality: Option<u8>,

    /// Output progress and status as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Write the effective configuration to this file before running
    #[arg(long)]
    save_config: Option<PathBuf>,
}

#[derive(Args)]
struct RelocateArgs {
    /// Site root containing the items to move
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Name of the public directory, created inside the root
    #[arg(short, long, default_value = DEFAULT_PUBLIC_DIR)]
    public: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let json_output = matches!(&cli.command, Command::Compress(args) if args.json);
    init_logging(cli.verbose, json_output)?;

    match cli.command {
        Command::Compress(args) => compress(args).await,
        Command::Relocate(args) => relocate(args).await,
    }
}

/// INFO by default, DEBUG with `--verbose`; `RUST_LOG` wins when set.
/// In JSON mode the log lines go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool, json_output: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_output {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

async fn compress(args: CompressArgs) -> Result<ExitCode> {
    let mut config = match args.config {
        Some(ref path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(source) = args.source {
        config.source_root = source;
    }
    if let Some(dest) = args.dest {
        config.dest_root = dest;
    }
    if let Some(max_width) = args.max_width {
        config.max_width = max_width;
    }
    if let Some(quality) = args.quality {
        config.quality = quality;
    }
    if args.json {
        config.json_output = true;
    }

    let mirror = DirectoryMirror::new(config)?;

    if let Some(ref path) = args.save_config {
        mirror.config().save_to_file(path).await?;
        info!("Saved configuration to {}", path.display());
    }

    match mirror.run().await {
        Ok(stats) if stats.errors == 0 => Ok(ExitCode::SUCCESS),
        Ok(stats) => {
            warn!("{} entries could not be processed", stats.errors);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            if mirror.config().json_output {
                JsonMessage::error(e.to_string(), Some(mirror.config().source_root.clone())).emit();
            }
            error!("❌ {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn relocate(args: RelocateArgs) -> Result<ExitCode> {
    let report = relocate_static_files(&args.root, &args.public).await?;
    info!(
        "You can now commit these changes: {} moved, {} skipped",
        report.moved.len(),
        report.skipped.len()
    );
    Ok(ExitCode::SUCCESS)
}
