use anyhow::Result;
use clap::{Parser, Subcommand};
use tourpatch::{Differ, Patch, Patcher, StrictPatcher};
use tracing_subscriber::EnvFilter;

use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Generate and apply tour plan patches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a patch from two files
    Generate {
        /// The original file
        #[arg(short = 'i', long)]
        old: PathBuf,

        /// The new file
        #[arg(short, long)]
        new: PathBuf,

        /// The output patch file (defaults to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of context lines to include
        #[arg(short, long, default_value_t = 3)]
        context: usize,
    },

    /// Apply a patch to a file, with fallback for imperfect patches
    Apply {
        /// The patch file to apply
        #[arg(short, long)]
        patch: PathBuf,

        /// The file to apply the patch to
        #[arg(short, long)]
        file: PathBuf,

        /// The output file (defaults to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on the first mismatch instead of falling back
        #[arg(short, long, default_value_t = false)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            old,
            new,
            output,
            context,
        } => {
            let old_content = fs::read_to_string(&old)?;
            let new_content = fs::read_to_string(&new)?;

            let patch = Differ::new(&old_content, &new_content)
                .context_lines(context)
                .generate();
            let result = patch.to_string();

            match output {
                Some(path) => fs::write(path, result)?,
                None => print!("{}", result),
            }
        }

        Commands::Apply {
            patch: patch_path,
            file,
            output,
            strict,
        } => {
            let diff = fs::read_to_string(&patch_path)?;
            let content = fs::read_to_string(&file)?;

            let result = if strict {
                let patch = Patch::parse(&diff)?;
                StrictPatcher::new(&patch).apply(&content)?
            } else {
                Patcher::new(&diff).apply(&content)?
            };

            match output {
                Some(path) => fs::write(path, result)?,
                None => print!("{}", result),
            }
        }
    }

    Ok(())
}
