//! CLI argument parsing for evalstats

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "evalstats")]
#[command(version)]
#[command(about = "Replay determinism statistics and t-test power analysis", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize replay experiment results (JSONL)
    Replay(ReplayArgs),

    /// Print power tables for the planned experiments
    PowerTable(PowerTableArgs),

    /// Compute paired t-test power for one sample size
    Power(PowerArgs),

    /// Find the minimum sample size reaching a target power
    SampleSize(SampleSizeArgs),

    /// Prompt for n, d and alpha on stdin, then compute power
    Interactive(InteractiveArgs),
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Replay results file, one JSON trial per line
    #[arg(value_name = "RESULTS")]
    pub results: PathBuf,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Where to save the JSON statistics (default: replay_statistics.json next to RESULTS)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not persist the JSON statistics
    #[arg(long)]
    pub no_save: bool,

    /// TOML file with summary settings (z_score, percentile, unknown_hash, output_file_name)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PowerTableArgs {
    /// TOML file with scenario grids (default: built-in grids)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Significance and tail options shared by the power subcommands
#[derive(Args, Debug, Clone)]
pub struct TestArgs {
    /// Significance level
    #[arg(short, long, default_value = "0.05")]
    pub alpha: f64,

    /// Use a two-tailed test instead of the default one-tailed test
    #[arg(long)]
    pub two_tailed: bool,
}

#[derive(Args, Debug)]
pub struct PowerArgs {
    /// Sample size (number of pairs)
    #[arg(short = 'n', long = "sample-size")]
    pub n: usize,

    /// Expected Cohen's d effect size
    #[arg(short = 'd', long = "effect-size", allow_negative_numbers = true)]
    pub d: f64,

    #[command(flatten)]
    pub test: TestArgs,

    /// Target power for the sample-size recommendation
    #[arg(long = "target", value_name = "POWER", default_value = "0.8")]
    pub target_power: f64,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct SampleSizeArgs {
    /// Expected Cohen's d effect size
    #[arg(short = 'd', long = "effect-size", allow_negative_numbers = true)]
    pub d: f64,

    #[command(flatten)]
    pub test: TestArgs,

    /// Target power
    #[arg(short, long, default_value = "0.8")]
    pub power: f64,

    /// Largest sample size to search
    #[arg(long, default_value = "1000")]
    pub max_n: usize,
}

#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Alpha used when the alpha prompt is left blank
    #[arg(long, default_value = "0.017")]
    pub alpha_default: f64,

    /// Use a two-tailed test instead of the default one-tailed test
    #[arg(long)]
    pub two_tailed: bool,
}
