use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use evalstats::cli::{
    Cli, Command, InteractiveArgs, OutputFormat, PowerArgs, PowerTableArgs, ReplayArgs,
    SampleSizeArgs,
};
use evalstats::interactive::prompt_parameters;
use evalstats::power::{
    build_power_tables, find_sample_size, interpret_cohens_d, recommend, PowerConfig, TableConfig,
    TailMode,
};
use evalstats::replay::{load_trials, summarize_with, ReplayConfig};

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Default report location: next to the results file
fn default_output_path(results: &Path, config: &ReplayConfig) -> PathBuf {
    results
        .parent()
        .map(|dir| dir.join(&config.output_file_name))
        .unwrap_or_else(|| PathBuf::from(&config.output_file_name))
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ReplayConfig::from_file(path)?,
        None => ReplayConfig::default(),
    };

    let trials = load_trials(&args.results)
        .with_context(|| format!("Failed to load replay results from {}", args.results.display()))?;
    let summary = summarize_with(&trials, &config).context("Failed to summarize replay results")?;
    let json = summary.to_json_pretty()?;

    match args.format {
        OutputFormat::Text => print!("{}", summary.to_report_string()),
        OutputFormat::Json => println!("{}", json),
    }

    if args.no_save {
        return Ok(());
    }

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.results, &config));
    std::fs::write(&output, format!("{}\n", json))
        .with_context(|| format!("Failed to write statistics to {}", output.display()))?;
    tracing::debug!("Wrote replay statistics to {}", output.display());

    // Keep stdout parseable in JSON mode
    match args.format {
        OutputFormat::Text => println!("\n📊 Statistics saved to: {}", output.display()),
        OutputFormat::Json => eprintln!("📊 Statistics saved to: {}", output.display()),
    }

    Ok(())
}

fn run_power_table(args: PowerTableArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => TableConfig::from_file(path)?,
        None => TableConfig::default(),
    };

    let tables = build_power_tables(&config).context("Failed to compute power tables")?;

    match args.format {
        OutputFormat::Text => print!("{}", tables.to_report_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tables)?),
    }

    Ok(())
}

fn run_power(args: PowerArgs) -> Result<()> {
    let tail = TailMode::from_one_tailed(!args.test.two_tailed);
    let config = PowerConfig::new(args.test.alpha, args.target_power, tail);

    let result = recommend(args.n, args.d, args.test.alpha, &config)
        .context("Failed to compute statistical power")?;

    match args.format {
        OutputFormat::Text => print!("{}", result.to_report_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

fn run_sample_size(args: SampleSizeArgs) -> Result<()> {
    let config = PowerConfig {
        search_bound: args.max_n,
        ..PowerConfig::new(
            args.test.alpha,
            args.power,
            TailMode::from_one_tailed(!args.test.two_tailed),
        )
    };

    let n = find_sample_size(args.d, &config).context("Sample size search failed")?;

    println!("Effect size: d = {} ({})", args.d, interpret_cohens_d(args.d));
    println!(
        "Target: power ≥ {} at α = {} ({})",
        config.target_power, config.alpha, config.tail
    );
    println!("Minimum sample size: n = {}", n);

    Ok(())
}

fn run_interactive<R: BufRead, W: Write>(
    args: InteractiveArgs,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "Interactive Power Calculator")?;
    writeln!(output, "{}", "-".repeat(40))?;

    let Some(params) = prompt_parameters(input, output, args.alpha_default)? else {
        writeln!(output, "\nExiting interactive calculator.")?;
        return Ok(());
    };

    let config = PowerConfig {
        tail: TailMode::from_one_tailed(!args.two_tailed),
        ..PowerConfig::default()
    };
    let result = recommend(params.n, params.d, params.alpha, &config)
        .context("Failed to compute statistical power")?;

    write!(output, "\n{}", result.to_report_string())?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(cli.debug);

    match cli.command {
        Command::Replay(args) => run_replay(args),
        Command::PowerTable(args) => run_power_table(args),
        Command::Power(args) => run_power(args),
        Command::SampleSize(args) => run_sample_size(args),
        Command::Interactive(args) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            run_interactive(args, &mut stdin.lock(), &mut stdout.lock())
        }
    }
}
