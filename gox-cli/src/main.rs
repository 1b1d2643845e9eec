use anyhow::Result;
use clap::{Parser, Subcommand};
use gox_cli::logging::{LogLevel, init_logging};
use gox_cli::{EmitMode, build_cmd, check_cmd};
use gox_lower::RenderApi;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gox", version, about = "Markup-in-Go translator")]
struct Cli {
    /// Log verbosity (overrides GOX_LOG)
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,
    /// Package the generated rendering calls are qualified with
    #[arg(long, global = true, default_value = "vecty")]
    api_package: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a .gox file into Go.
    Build {
        /// Path to .gox file
        input: PathBuf,
        /// Output directory (default: target/gox-gen)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// What to emit: lowered Go, the parsed tree, or the token stream
        #[arg(long, value_enum, default_value_t = EmitMode::Go)]
        emit: EmitMode,
    },
    /// Parse and translate without writing output.
    Check {
        /// Path to .gox file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    let api = RenderApi::with_package(cli.api_package);

    match cli.command {
        Commands::Build {
            input,
            out_dir,
            emit,
        } => {
            build_cmd(&input, out_dir.as_deref(), emit, &api)?;
        }
        Commands::Check { input } => check_cmd(&input, &api)?,
    }
    Ok(())
}
