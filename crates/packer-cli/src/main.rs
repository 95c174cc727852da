mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "python-packer",
    about = "Package Python projects into container images"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a container image from a Python project
    Docker {
        /// Path to the Python project directory (must contain __main__.py)
        #[arg(long)]
        project_path: PathBuf,
        /// Name of the output image
        #[arg(long)]
        output_image: String,
        /// Name of the base image to build from
        #[arg(long)]
        base_image: String,
        /// Path to the Dockerfile (default: <project-path>/Dockerfile)
        #[arg(long)]
        dockerfile: Option<PathBuf>,
    },
    /// Print the Dockerfile that would be generated for a base image
    Dockerfile {
        /// Name of the base image to build from
        #[arg(long)]
        base_image: String,
        /// Write to this file instead of stdout (never overwrites)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // arch-lint: allow(no-silent-result-drop) reason="unset or unparsable RUST_LOG falls back to info"
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Docker {
            project_path,
            output_image,
            base_image,
            dockerfile,
        } => {
            let args = packer_core::PackageArgs {
                project_path,
                output_image,
                base_image,
                dockerfile,
            };
            commands::docker(&args).await?
        }
        Commands::Dockerfile { base_image, output } => {
            commands::dockerfile(&base_image, output.as_deref())?
        }
    }

    Ok(())
}
