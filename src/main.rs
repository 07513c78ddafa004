//! review-rank CLI
//!
//! # Usage
//!
//! ```bash
//! # Score every hotel table in a directory
//! review-rank score classified/ scored/
//!
//! # Compare top-K against random-K indicativeness deviation
//! review-rank evaluate scored/ --subset-size 10 --trials 100 --format json
//!
//! # Build per-hotel topic sentiment profiles, then re-rank by preference
//! review-rank profile classified/ profiles.csv
//! review-rank recommend profiles.csv -w "Staff=5" -w "Location=3" ...
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rustc_hash::FxHashMap;
use tracing_subscriber::EnvFilter;

use review_rank::errors::Error;
use review_rank::pipeline::{load_scored_directory, score_directory};
use review_rank::profile::{profile_directory, read_profiles, write_profiles};
use review_rank::{
    evaluate_hotels, rank_hotels, EvaluationReport, HotelRanker, RankConfig, Result,
};

#[derive(Parser)]
#[command(name = "review-rank")]
#[command(about = "PageRank importance ranking of hotel reviews", long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options that layer over the JSON config
#[derive(Args)]
struct ConfigArgs {
    /// JSON run configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// PageRank damping factor
    #[arg(long, global = true)]
    damping: Option<f64>,

    /// Reviews per subset (K)
    #[arg(long, global = true)]
    subset_size: Option<usize>,

    /// Random trials per hotel (R)
    #[arg(long, global = true)]
    trials: Option<usize>,

    /// Seed for random subsets
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score reviews of every hotel table in a directory
    Score {
        /// Directory of topic-classified review tables
        input: PathBuf,

        /// Directory for the scored tables
        output: PathBuf,
    },

    /// Compare top-K and random-K indicativeness deviation
    Evaluate {
        /// Directory of scored review tables
        input: PathBuf,

        /// Report format
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },

    /// Compute per-hotel topic sentiment profiles
    Profile {
        /// Directory of topic-classified review tables
        input: PathBuf,

        /// Profile table to write
        output: PathBuf,
    },

    /// Re-rank hotels by weighted topic preferences
    Recommend {
        /// Profile table written by `profile`
        profiles: PathBuf,

        /// Topic importance as `Topic=N`, N in 0..=5; one per topic
        #[arg(short, long = "weight", value_parser = parse_weight, required = true)]
        weights: Vec<(String, u32)>,

        /// Hotel to include; repeat to compare several. Default: all hotels
        #[arg(long = "hotel")]
        hotels: Vec<String>,

        /// Number of hotels to print
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Aligned table
    Text,
    /// Pretty-printed JSON
    Json,
}

fn parse_weight(arg: &str) -> std::result::Result<(String, u32), String> {
    let (topic, weight) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected Topic=N, got \"{arg}\""))?;
    let weight = weight
        .trim()
        .parse()
        .map_err(|_| format!("weight must be an integer, got \"{weight}\""))?;
    Ok((topic.trim().to_string(), weight))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.overrides)?;

    match cli.command {
        Commands::Score { input, output } => cmd_score(&config, &input, &output),
        Commands::Evaluate { input, format } => cmd_evaluate(&config, &input, format),
        Commands::Profile { input, output } => cmd_profile(&config, &input, &output),
        Commands::Recommend {
            profiles,
            weights,
            hotels,
            limit,
        } => cmd_recommend(&config, &profiles, weights, &hotels, limit),
    }
}

fn load_config(args: &ConfigArgs) -> Result<RankConfig> {
    let mut config = match &args.config {
        Some(path) => RankConfig::from_path(path)?,
        None => RankConfig::default(),
    };
    if let Some(damping) = args.damping {
        config.pagerank.damping = damping;
    }
    if let Some(subset_size) = args.subset_size {
        config.evaluation.subset_size = subset_size;
    }
    if let Some(trials) = args.trials {
        config.evaluation.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.evaluation.seed = seed;
    }
    config.validated()
}

fn cmd_score(config: &RankConfig, input: &Path, output: &Path) -> Result<()> {
    let ranker = HotelRanker::from_config(config);
    let files = score_directory(&ranker, input, output)?;

    let unconverged = files.iter().filter(|f| !f.report.converged).count();
    let reviews: usize = files.iter().map(|f| f.reviews).sum();
    tracing::info!(hotels = files.len(), reviews, unconverged, "scoring complete");
    Ok(())
}

fn cmd_evaluate(config: &RankConfig, input: &Path, format: ReportFormat) -> Result<()> {
    let hotels = load_scored_directory(input, &config.topics, &config.score_column)?;
    let evaluator = config.evaluator();
    let report = evaluate_hotels(&hotels, &config.topics, &evaluator, config.evaluation.seed);

    let mut out = io::stdout().lock();
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out).map_err(|e| Error::io("<stdout>", e))
        }
        ReportFormat::Text => print_report(&mut out, &report).map_err(|e| Error::io("<stdout>", e)),
    }
}

fn print_report<W: Write>(out: &mut W, report: &EvaluationReport) -> io::Result<()> {
    writeln!(
        out,
        "{} hotels, K = {}, {} random trials per hotel",
        report.hotels, report.subset_size, report.trials
    )?;
    writeln!(
        out,
        "{:<24} {:>12} {:>12} {:>12} {:>12}",
        "Topic", "top-K mean", "top-K std", "random mean", "random std"
    )?;
    for row in &report.topics {
        writeln!(
            out,
            "{:<24} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            row.topic, row.top_k.mean, row.top_k.std_dev, row.random_k.mean, row.random_k.std_dev
        )?;
    }
    Ok(())
}

fn cmd_profile(config: &RankConfig, input: &Path, output: &Path) -> Result<()> {
    let profiles = profile_directory(input, &config.topics)?;
    let file = File::create(output).map_err(|e| Error::io(output, e))?;
    write_profiles(&profiles, &config.topics, BufWriter::new(file))?;
    tracing::info!(hotels = profiles.len(), output = %output.display(), "saved profiles");
    Ok(())
}

fn cmd_recommend(
    config: &RankConfig,
    profiles: &Path,
    weights: Vec<(String, u32)>,
    hotels: &[String],
    limit: usize,
) -> Result<()> {
    let file = File::open(profiles).map_err(|e| Error::io(profiles, e))?;
    let profiles = read_profiles(file, &config.topics)?;
    let weights: FxHashMap<String, u32> = weights.into_iter().collect();
    let ranked = rank_hotels(&profiles, &config.topics, &weights, hotels)?;

    let mut out = io::stdout().lock();
    for (rank, hotel) in ranked.iter().take(limit).enumerate() {
        writeln!(out, "{:>3}. {:<40} {:>8.4}", rank + 1, hotel.hotel, hotel.score)
            .map_err(|e| Error::io("<stdout>", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("Staff=5").unwrap(), ("Staff".to_string(), 5));
        assert_eq!(
            parse_weight("Food and beverages = 2").unwrap(),
            ("Food and beverages".to_string(), 2)
        );
        assert!(parse_weight("Staff").is_err());
        assert!(parse_weight("Staff=high").is_err());
    }

    #[test]
    fn test_cli_parses_global_overrides() {
        let cli = Cli::try_parse_from([
            "review-rank",
            "evaluate",
            "scored",
            "--subset-size",
            "5",
            "--seed",
            "7",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.overrides.subset_size, Some(5));
        assert_eq!(cli.overrides.seed, Some(7));
        assert!(matches!(cli.command, Commands::Evaluate { format: ReportFormat::Json, .. }));
    }

    #[test]
    fn test_recommend_collects_hotels() {
        let cli = Cli::try_parse_from([
            "review-rank",
            "recommend",
            "profiles.csv",
            "-w",
            "Staff=5",
            "--hotel",
            "The Ritz",
            "--hotel",
            "Savoy",
        ])
        .unwrap();
        match cli.command {
            Commands::Recommend { hotels, weights, .. } => {
                assert_eq!(hotels, vec!["The Ritz", "Savoy"]);
                assert_eq!(weights, vec![("Staff".to_string(), 5)]);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_overrides_are_validated() {
        let args = ConfigArgs {
            config: None,
            damping: Some(1.5),
            subset_size: None,
            trials: None,
            seed: None,
        };
        assert!(matches!(load_config(&args), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_print_report() {
        let report = EvaluationReport {
            subset_size: 10,
            trials: 100,
            hotels: 2,
            topics: Vec::new(),
        };
        let mut out = Vec::new();
        print_report(&mut out, &report).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("2 hotels, K = 10"));
    }
}
