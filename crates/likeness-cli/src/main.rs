use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use likeness_core::{FaceMatcher, MatchResult};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod batch;
mod config;
mod input;

use config::Config;

#[derive(Parser)]
#[command(name = "likeness", about = "Face embedding comparison CLI")]
struct Cli {
    /// TOML policy file (overrides LIKENESS_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two embedding files
    Compare {
        a: PathBuf,
        b: PathBuf,
        /// L2-normalize both embeddings before comparing
        #[arg(short, long)]
        normalize: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare every pair in a JSON Lines file
    Batch {
        pairs: PathBuf,
        /// Worker shards (defaults to LIKENESS_WORKERS or 4)
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Print an embedding file L2-normalized
    Normalize { path: PathBuf },
    /// Print the effective match policy as TOML
    Policy,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let matcher = FaceMatcher::new(config.policy);

    match cli.command {
        Commands::Compare {
            a,
            b,
            normalize,
            json,
        } => {
            let mut e1 = input::read_embedding(&a)?;
            let mut e2 = input::read_embedding(&b)?;
            if normalize {
                e1 = e1.normalized().into_embedding();
                e2 = e2.normalized().into_embedding();
            }
            let result = matcher
                .compare_embeddings(&e1, &e2)
                .with_context(|| format!("cannot compare {} and {}", a.display(), b.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_summary(&result);
            }
        }
        Commands::Batch { pairs, workers } => {
            let text = std::fs::read_to_string(&pairs)
                .with_context(|| format!("failed to read {}", pairs.display()))?;
            let specs = input::parse_pairs(&text)?;
            let config = config.with_workers(workers)?;
            for line in batch::run_batch(matcher, specs, config.workers).await? {
                println!("{}", serde_json::to_string(&line)?);
            }
        }
        Commands::Normalize { path } => {
            let normalized = input::read_embedding(&path)?.normalized();
            if normalized.is_zero() {
                tracing::warn!(path = %path.display(), "embedding norm too small; output is all zeros");
            }
            println!("{}", serde_json::to_string(&normalized)?);
        }
        Commands::Policy => {
            print!("{}", toml::to_string_pretty(&config.policy)?);
        }
    }

    Ok(())
}

fn print_summary(result: &MatchResult) {
    let verdict = if result.is_match { "MATCH" } else { "NO MATCH" };
    println!("{verdict} ({}, confidence {})", result.match_type, result.confidence);
    println!("  cosine similarity:  {:.4}", result.cosine_similarity);
    println!("  euclidean distance: {:.4}", result.euclidean_distance);
    println!("  quality score:      {:.6}", result.quality_score);
}
