//! Synthetic embedding CLI
//!
//! Generates fixture vectors as JSON for vector-search tests.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use percolate_synth::fixtures::{load_documents, FixtureBuilder};
use percolate_synth::random::par_normalized_vectors;
use percolate_synth::{EmbeddingGenerator, GeneratorConfig, Vector};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Synthetic embeddings with controllable similarity scores
#[derive(Parser)]
#[command(name = "synth")]
#[command(about = "Generate synthetic embedding vectors for vector-search fixtures", long_about = None)]
#[command(version)]
struct Cli {
    /// RNG seed for reproducible output
    #[arg(long, global = true, env = "P8_SYNTH_SEED")]
    seed: Option<u64>,

    /// JSON config file (default: ~/.p8/synth.json if present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Write JSON to this file instead of stdout
    #[arg(long, short, global = true)]
    output: Option<String>,

    /// Score solver retry budget
    #[arg(long, global = true, env = "P8_SYNTH_MAX_ATTEMPTS")]
    max_attempts: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Random vectors with components in [-1, 1)
    Vector {
        /// Vector dimension (default from config)
        #[arg(long)]
        dim: Option<usize>,

        /// Number of vectors
        #[arg(long, default_value = "1")]
        count: usize,

        /// Generate in parallel, one seeded RNG per vector (requires --seed)
        #[arg(long)]
        parallel: bool,
    },

    /// Random vector orthogonal to the given basis vectors
    Orthogonal {
        /// Vector dimension (default from config, or the basis dimension)
        #[arg(long)]
        dim: Option<usize>,

        /// Basis vector as comma-separated components (repeatable)
        #[arg(long, allow_hyphen_values = true)]
        basis: Vec<CliVector>,
    },

    /// Set of mutually orthogonal vectors
    Basis {
        /// Number of vectors (at most the dimension)
        #[arg(long)]
        count: usize,

        /// Vector dimension (default from config)
        #[arg(long)]
        dim: Option<usize>,
    },

    /// Document vector with a target score against a query
    Score {
        /// Target similarity in [0, 1]
        #[arg(long)]
        score: f64,

        /// Query vector as comma-separated components
        #[arg(long, allow_hyphen_values = true)]
        query: CliVector,

        /// Fixed leading document components (dimension - 1 values); random if omitted
        #[arg(long, allow_hyphen_values = true)]
        leading: Option<CliVector>,
    },

    /// Random vector and a collinear companion with an exact score
    Scaled {
        /// Target similarity in [0, 1]
        #[arg(long)]
        score: f64,

        /// Primary vector; random if omitted
        #[arg(long, allow_hyphen_values = true)]
        primary: Option<CliVector>,

        /// Dimension of the random primary (default from config)
        #[arg(long)]
        dim: Option<usize>,
    },

    /// Embedded fixture set from a JSON/YAML list of scored documents
    Fixtures {
        /// Document file (.json, .yaml, .yml)
        documents: String,

        /// Query vector; derived from the seed if omitted
        #[arg(long, allow_hyphen_values = true)]
        query: Option<CliVector>,

        /// Vector dimension (default from config, or the query dimension)
        #[arg(long)]
        dim: Option<usize>,
    },
}

/// Comma-separated vector argument, e.g. `-0.5,0.24,0.71`.
#[derive(Debug, Clone)]
struct CliVector(Vector);

impl FromStr for CliVector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid component '{}': {}", part.trim(), e))
            })
            .collect::<Result<Vector, _>>()
            .map(CliVector)
    }
}

#[derive(Serialize)]
struct ScaledPair {
    primary: Vector,
    companion: Vector,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    tracing::debug!(?config, "resolved generator config");

    let mut gen = EmbeddingGenerator::from_config(&config);

    match cli.command {
        Commands::Vector {
            dim,
            count,
            parallel,
        } => {
            let dim = dim.unwrap_or(config.dimension);
            let vectors = if parallel {
                let seed = config
                    .seed
                    .context("--parallel needs a seed (--seed or P8_SYNTH_SEED)")?;
                par_normalized_vectors(seed, count, dim)?
            } else {
                (0..count)
                    .map(|_| gen.normalized_vector(dim))
                    .collect::<percolate_synth::Result<Vec<_>>>()?
            };
            emit(cli.output.as_deref(), &vectors)
        }

        Commands::Orthogonal { dim, basis } => {
            let basis: Vec<Vector> = basis.into_iter().map(|v| v.0).collect();
            let dim = dim
                .or_else(|| basis.first().map(|b| b.len()))
                .unwrap_or(config.dimension);
            let v = gen
                .orthogonal_vector(dim, &basis)
                .context("failed to build orthogonal vector")?;
            emit(cli.output.as_deref(), &v)
        }

        Commands::Basis { count, dim } => {
            let dim = dim.unwrap_or(config.dimension);
            let set = gen
                .independent_vector_set(count, dim)
                .with_context(|| format!("failed to build {} orthogonal vectors", count))?;
            emit(cli.output.as_deref(), &set)
        }

        Commands::Score {
            score,
            query,
            leading,
        } => {
            let query = query.0;
            let doc = match leading {
                Some(CliVector(mut basis)) => {
                    if basis.len() + 1 != query.len() {
                        bail!(
                            "--leading needs {} components for a {}-dimensional query, got {}",
                            query.len().saturating_sub(1),
                            query.len(),
                            basis.len()
                        );
                    }
                    basis.push(0.0);
                    gen.score_vector(score, &query, basis)
                }
                None => gen.score_vector_random(score, &query),
            }
            .context("failed to solve score vector")?;
            emit(cli.output.as_deref(), &doc)
        }

        Commands::Scaled {
            score,
            primary,
            dim,
        } => {
            let (primary, companion) = match primary {
                Some(CliVector(primary)) => {
                    let companion = percolate_synth::scaled_vector(score, &primary)?;
                    (primary, companion)
                }
                None => gen.scaled_pair(score, dim.unwrap_or(config.dimension))?,
            };
            emit(cli.output.as_deref(), &ScaledPair { primary, companion })
        }

        Commands::Fixtures {
            documents,
            query,
            dim,
        } => {
            let path = GeneratorConfig::expand_path(&documents)?;
            let docs = load_documents(&path)
                .with_context(|| format!("failed to read documents from {}", path.display()))?;

            let query = query.map(|q| q.0);
            let dim = dim
                .or_else(|| query.as_ref().map(|q| q.len()))
                .unwrap_or(config.dimension);
            let seed = config.seed.unwrap_or_else(rand::random);

            let set = FixtureBuilder::new(dim, seed)
                .with_solver(config.solver_config())
                .build(query, &docs)
                .context("failed to build fixtures")?;
            tracing::info!(documents = set.documents.len(), seed, "built fixture set");
            emit(cli.output.as_deref(), &set)
        }
    }
}

/// Defaults, then config file, then environment, then CLI flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<GeneratorConfig> {
    let mut config = GeneratorConfig::load_or_default(cli.config.as_deref())
        .context("failed to load config")?
        .with_env()?;

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.max_attempts = max_attempts;
    }

    config.validate()?;
    Ok(config)
}

fn emit<T: Serialize + ?Sized>(output: Option<&str>, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            let path: PathBuf = GeneratorConfig::expand_path(path)?;
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_globals_bound_to_env() {
        let cmd = Cli::command();
        let env_of = |id: &str| {
            cmd.get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(|a| a.get_env())
                .map(OsStr::to_os_string)
        };

        assert_eq!(env_of("seed").as_deref(), Some(OsStr::new("P8_SYNTH_SEED")));
        assert_eq!(
            env_of("max_attempts").as_deref(),
            Some(OsStr::new("P8_SYNTH_MAX_ATTEMPTS"))
        );
    }

    #[test]
    fn test_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "synth", "score", "--score", "0.8", "--query", "-0.5,0.24,0.71", "--seed", "9",
            "--max-attempts", "12",
        ])
        .unwrap();

        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.max_attempts, Some(12));
        match cli.command {
            Commands::Score { score, query, .. } => {
                assert_eq!(score, 0.8);
                assert_eq!(query.0, vec![-0.5, 0.24, 0.71]);
            }
            _ => panic!("expected score subcommand"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
