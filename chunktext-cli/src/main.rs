mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chunktext_core::constants::{DEFAULT_PREFIX, DEFAULT_SCATTER_DIRS, DEFAULT_SUFFIX};

#[derive(Parser)]
#[command(name = "chunktext", about = "Split binary files into base64 text chunks and merge them back")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a binary file into base64-encoded chunk files
    Split {
        /// Path to the file to split
        source: String,

        /// Directory that receives the chunk files (created if missing)
        output_dir: String,

        /// Chunk file name prefix
        #[arg(default_value = DEFAULT_PREFIX)]
        prefix: String,

        /// Chunk file name suffix
        #[arg(default_value = DEFAULT_SUFFIX)]
        suffix: String,

        /// Chunk size in MB. Invalid values fall back to 16 with a warning.
        chunk_size_mb: Option<String>,

        /// Also write a chunks.manifest.json recording chunk order
        #[arg(long)]
        manifest: bool,
    },

    /// Merge a directory of chunk files back into a single binary file
    Merge {
        /// Directory containing the chunk files
        input_dir: String,

        /// Path of the reassembled output file
        output_file: String,
    },

    /// Distribute chunk files evenly into numbered subdirectories
    Scatter {
        /// Directory containing the chunk files
        input_dir: String,

        /// Number of subdirectories to create
        #[arg(default_value_t = DEFAULT_SCATTER_DIRS)]
        num_dirs: u32,

        /// Chunk file name prefix
        #[arg(default_value = DEFAULT_PREFIX)]
        prefix: String,

        /// Chunk file name suffix
        #[arg(default_value = DEFAULT_SUFFIX)]
        suffix: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Inspect a chunk directory without modifying it
    Info {
        /// Directory containing the chunk files
        input_dir: String,

        /// Chunk file name prefix
        #[arg(default_value = DEFAULT_PREFIX)]
        prefix: String,

        /// Chunk file name suffix
        #[arg(default_value = DEFAULT_SUFFIX)]
        suffix: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing (controlled by RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Split {
            source,
            output_dir,
            prefix,
            suffix,
            chunk_size_mb,
            manifest,
        } => {
            commands::split::run_split(
                &source,
                &output_dir,
                &prefix,
                &suffix,
                chunk_size_mb.as_deref(),
                manifest,
            )
            .await
            .map(|_| ())
        }
        Commands::Merge {
            input_dir,
            output_file,
        } => commands::merge::run_merge(&input_dir, &output_file).await,
        Commands::Scatter {
            input_dir,
            num_dirs,
            prefix,
            suffix,
            yes,
        } => commands::scatter::run_scatter(&input_dir, num_dirs, &prefix, &suffix, yes).await,
        Commands::Info {
            input_dir,
            prefix,
            suffix,
        } => commands::info::run_info(&input_dir, &prefix, &suffix).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
