use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use binwheel_lib::WheelSpec;

mod cmd;
#[cfg(feature = "yaml")]
mod config;
mod output;

use cmd::{cmd_build, cmd_info};
use output::print_error;

/// binwheel - Package pre-built executables as python wheels
#[derive(Parser)]
#[command(name = "binwheel")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build one wheel per platform declared in a wheel spec
  Build {
    /// Path to the YAML wheel spec
    #[arg(long)]
    wheel_spec: PathBuf,

    /// Directory the wheels are written to
    #[arg(long, default_value = "dist/")]
    dist_folder: PathBuf,

    /// Do not append a RECORD manifest to the wheels
    #[arg(long)]
    no_record: bool,
  },

  /// Show the wheel tag of the current platform
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build {
      wheel_spec,
      dist_folder,
      no_record,
    } => cmd_build(&wheel_spec, &dist_folder, no_record),
    Commands::Info => {
      cmd_info();
      Ok(())
    }
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}

#[cfg(feature = "yaml")]
fn load_wheel_spec(path: &Path) -> Result<WheelSpec> {
  config::load_wheel_spec(path)
}

#[cfg(not(feature = "yaml"))]
fn load_wheel_spec(_path: &Path) -> Result<WheelSpec> {
  anyhow::bail!("YAML support not compiled in, can not use CLI. Rebuild binwheel with the 'yaml' feature.")
}
