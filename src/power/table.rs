//! Power tables for the evaluation's planned experiments
//!
//! Sweeps the power and sample-size functions over fixed scenario grids. The
//! default grids reproduce the published tables; a TOML file may replace any
//! of them.
//!
//! # Example grid file
//!
//! ```toml
//! [paired]
//! sample_sizes = [20, 30, 40, 50]
//! effect_sizes = [0.3, 0.5, 0.8]
//! alpha = 0.017
//!
//! [one_sample]
//! threshold = 0.70
//! sample_size = 50
//! scenarios = [
//!     { expected_mean = 0.80, assumed_sd = 0.10 },
//! ]
//!
//! [sample_size]
//! target_power = 0.80
//! effect_sizes = [0.5]
//! alphas = [0.05, 0.017]
//! ```

use super::config::PowerConfig;
use super::effect_size::{interpret_cohens_d, EffectSize};
use super::sample_size::find_sample_size;
use super::ttest::{effect_size_from_threshold, power_one_sample_t_test, power_paired_t_test};
use super::{PowerError, Result, TailMode};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Power required of the H2 scenarios before they are recommended
const H2_RECOMMENDED_POWER: f64 = 0.95;

/// H1: paired t-test power over sample sizes x effect sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairedGrid {
    pub sample_sizes: Vec<usize>,
    pub effect_sizes: Vec<f64>,
    pub alpha: f64,
    pub tail: TailMode,
}

impl Default for PairedGrid {
    fn default() -> Self {
        Self {
            sample_sizes: vec![20, 30, 40, 50, 75, 100],
            effect_sizes: vec![0.3, 0.5, 0.8],
            alpha: 0.017,
            tail: TailMode::OneTailed,
        }
    }
}

/// Expected mean and assumed SD of one H2 scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub expected_mean: f64,
    pub assumed_sd: f64,
}

/// H2: one-sample t-test power against a threshold at a fixed n
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneSampleGrid {
    pub threshold: f64,
    pub sample_size: usize,
    pub alpha: f64,
    pub tail: TailMode,
    pub scenarios: Vec<Scenario>,
}

impl Default for OneSampleGrid {
    fn default() -> Self {
        let scenario = |expected_mean, assumed_sd| Scenario {
            expected_mean,
            assumed_sd,
        };
        Self {
            threshold: 0.70,
            sample_size: 50,
            alpha: 0.017,
            tail: TailMode::OneTailed,
            scenarios: vec![
                scenario(0.75, 0.10), // small improvement, high variance
                scenario(0.80, 0.10),
                scenario(0.80, 0.05), // same improvement, low variance
                scenario(0.85, 0.10),
            ],
        }
    }
}

/// Required sample sizes over effect sizes x significance levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleSizeGrid {
    pub target_power: f64,
    pub effect_sizes: Vec<f64>,
    pub alphas: Vec<f64>,
    pub tail: TailMode,
}

impl Default for SampleSizeGrid {
    fn default() -> Self {
        Self {
            target_power: 0.80,
            effect_sizes: vec![0.3, 0.5, 0.8],
            alphas: vec![0.05, 0.017],
            tail: TailMode::OneTailed,
        }
    }
}

/// All scenario grids of the power report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub paired: PairedGrid,
    pub one_sample: OneSampleGrid,
    pub sample_size: SampleSizeGrid,

    /// Trials per replay experiment (H3 is descriptive; no power computed)
    pub replay_trials: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            paired: PairedGrid::default(),
            one_sample: OneSampleGrid::default(),
            sample_size: SampleSizeGrid::default(),
            replay_trials: 10,
        }
    }
}

impl TableConfig {
    /// Load scenario grids from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load scenario grids from a TOML string; omitted grids keep their defaults
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.paired.sample_sizes.is_empty() || self.paired.effect_sizes.is_empty() {
            return Err("paired grid needs at least one sample size and effect size".to_string());
        }
        if let Some(n) = self.paired.sample_sizes.iter().find(|&&n| n < 2) {
            return Err(format!("paired sample sizes must be >= 2, got {}", n));
        }
        if self.one_sample.sample_size < 2 {
            return Err(format!(
                "one-sample sample_size must be >= 2, got {}",
                self.one_sample.sample_size
            ));
        }
        if self.sample_size.effect_sizes.is_empty() || self.sample_size.alphas.is_empty() {
            return Err("sample-size grid needs at least one effect size and alpha".to_string());
        }
        Ok(())
    }
}

/// One row of the H1 table: power at each grid effect size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedRow {
    pub n: usize,
    pub powers: Vec<f64>,
}

/// One row of the H2 table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneSampleRow {
    pub scenario: Scenario,
    pub effect_size: f64,
    pub power: f64,
}

/// One row of the sample-size table; `None` marks a search past the bound
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSizeRow {
    pub effect_size: f64,
    pub label: EffectSize,
    pub sample_sizes: Vec<Option<usize>>,
}

/// Tabulated power analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerTables {
    pub config: TableConfig,
    pub paired: Vec<PairedRow>,
    pub one_sample: Vec<OneSampleRow>,
    pub sample_sizes: Vec<SampleSizeRow>,
    pub search_bound: usize,
}

/// Evaluate every grid of `config`
pub fn build_power_tables(config: &TableConfig) -> Result<PowerTables> {
    config.validate().map_err(PowerError::InvalidParameter)?;

    let paired_grid = &config.paired;
    let paired = paired_grid
        .sample_sizes
        .iter()
        .map(|&n| -> Result<PairedRow> {
            let powers = paired_grid
                .effect_sizes
                .iter()
                .map(|&d| power_paired_t_test(n, d, paired_grid.alpha, paired_grid.tail))
                .collect::<Result<Vec<_>>>()?;
            Ok(PairedRow { n, powers })
        })
        .collect::<Result<Vec<_>>>()?;

    let one_grid = &config.one_sample;
    let one_sample = one_grid
        .scenarios
        .iter()
        .map(|scenario| -> Result<OneSampleRow> {
            let effect_size =
                effect_size_from_threshold(scenario.expected_mean, one_grid.threshold, scenario.assumed_sd)?;
            let power = power_one_sample_t_test(
                one_grid.sample_size,
                effect_size,
                one_grid.alpha,
                one_grid.tail,
            )?;
            Ok(OneSampleRow {
                scenario: *scenario,
                effect_size,
                power,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let size_grid = &config.sample_size;
    let search = PowerConfig {
        target_power: size_grid.target_power,
        tail: size_grid.tail,
        ..PowerConfig::default()
    };
    let sample_sizes = size_grid
        .effect_sizes
        .iter()
        .map(|&d| -> Result<SampleSizeRow> {
            let sizes = size_grid
                .alphas
                .iter()
                .map(|&alpha| {
                    match find_sample_size(d, &PowerConfig { alpha, ..search.clone() }) {
                        Ok(n) => Ok(Some(n)),
                        Err(PowerError::SearchBoundExceeded { .. }) => Ok(None),
                        Err(e) => Err(e),
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(SampleSizeRow {
                effect_size: d,
                label: interpret_cohens_d(d),
                sample_sizes: sizes,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PowerTables {
        config: config.clone(),
        paired,
        one_sample,
        sample_sizes,
        search_bound: search.search_bound,
    })
}

fn effect_header(d: f64) -> String {
    format!("d={} ({})", d, interpret_cohens_d(d))
}

fn percent(p: f64) -> String {
    format!("{:.0}%", p * 100.0)
}

impl PowerTables {
    /// Column of the paired grid used for recommendations: the first medium
    /// effect size, else the middle column
    fn reference_column(&self) -> usize {
        let effects = &self.config.paired.effect_sizes;
        effects
            .iter()
            .position(|&d| interpret_cohens_d(d) == EffectSize::Medium)
            .unwrap_or(effects.len() / 2)
    }

    /// Smallest tabulated n whose power reaches the target at the reference
    /// effect size, with that power and effect size
    pub fn recommended_paired(&self) -> Option<(usize, f64, f64)> {
        let column = self.reference_column();
        let d = *self.config.paired.effect_sizes.get(column)?;
        self.paired
            .iter()
            .filter(|row| row.powers[column] >= self.config.sample_size.target_power)
            .min_by_key(|row| row.n)
            .map(|row| (row.n, row.powers[column], d))
    }

    /// Smallest expected mean among H2 scenarios whose power exceeds 95%
    pub fn recommended_one_sample_mean(&self) -> Option<f64> {
        self.one_sample
            .iter()
            .filter(|row| row.power > H2_RECOMMENDED_POWER)
            .map(|row| row.scenario.expected_mean)
            .min_by(f64::total_cmp)
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let heavy = "=".repeat(80);
        let light = "-".repeat(80);
        let target = self.config.sample_size.target_power;
        let mut report = String::new();

        report.push_str(&format!("{}\nPOWER ANALYSIS FOR THESIS EXPERIMENTS\n{}\n\n", heavy, heavy));

        // H1
        let paired = &self.config.paired;
        report.push_str(&format!(
            "H1: CORRECTNESS (Paired t-test, α={}, {})\n{}\n",
            paired.alpha, paired.tail, light
        ));
        report.push_str(&format!("{:<10}", "n"));
        for &d in &paired.effect_sizes {
            report.push_str(&format!(" {:<20}", effect_header(d)));
        }
        report.push_str(&format!("\n{}\n", light));
        for row in &self.paired {
            report.push_str(&format!("{:<10}", row.n));
            for power in &row.powers {
                report.push_str(&format!(" {:<20.2}", power));
            }
            report.push('\n');
        }
        report.push('\n');
        match self.recommended_paired() {
            Some((n, power, d)) => report.push_str(&format!(
                "RECOMMENDED: n={} gives {} power for {} effect (d={})\n\n",
                n,
                percent(power),
                interpret_cohens_d(d),
                d
            )),
            None => report.push_str(&format!(
                "No tabulated sample size reaches {} power\n\n",
                percent(target)
            )),
        }

        // H2
        let one = &self.config.one_sample;
        report.push_str(&format!(
            "H2: RETRIEVAL QUALITY (One-sample t-test, α={}, {})\n{}\n",
            one.alpha, one.tail, light
        ));
        report.push_str(&format!(
            "Scenario: Test whether the mean exceeds {:.2} (threshold)\n\n",
            one.threshold
        ));
        report.push_str(&format!(
            "{:<15} {:<15} {:<15} {:<15}\n{}\n",
            "Expected mean",
            "Assumed SD",
            "Cohen's d",
            format!("Power (n={})", one.sample_size),
            light
        ));
        for row in &self.one_sample {
            report.push_str(&format!(
                "{:<15.2} {:<15.2} {:<15.2} {:<15.2}\n",
                row.scenario.expected_mean, row.scenario.assumed_sd, row.effect_size, row.power
            ));
        }
        report.push('\n');
        match self.recommended_one_sample_mean() {
            Some(mean) => report.push_str(&format!(
                "RECOMMENDED: n={} gives >{} power if the mean is ≥ {:.2}\n\n",
                one.sample_size,
                percent(H2_RECOMMENDED_POWER),
                mean
            )),
            None => report.push_str(&format!(
                "No scenario exceeds {} power at n={}\n\n",
                percent(H2_RECOMMENDED_POWER),
                one.sample_size
            )),
        }

        // H3
        report.push_str(&format!(
            "H3: REPLAYABILITY (Descriptive analysis, no power calculation)\n{}\n",
            light
        ));
        report.push_str(&format!(
            "Expected SRA = 1.00 (100% exact match) across {} trials.\n",
            self.config.replay_trials
        ));
        report.push_str("If ANY trial fails (SRA < 1.00), investigate determinism bug.\n");
        report.push_str("No statistical test needed - this is a binary pass/fail criterion.\n\n");

        // Sample sizes
        let sizes = &self.config.sample_size;
        report.push_str(&format!(
            "{}\nSAMPLE SIZE RECOMMENDATIONS FOR TARGET POWER = {}\n{}\n\n",
            heavy,
            percent(target),
            heavy
        ));
        report.push_str(&format!("{:<20}", "Effect Size"));
        for &alpha in &sizes.alphas {
            report.push_str(&format!(" {:<15}", format!("α={}", alpha)));
        }
        report.push_str(&format!("\n{}\n", light));
        for row in &self.sample_sizes {
            report.push_str(&format!("{:<20}", format!("d={} ({})", row.effect_size, row.label)));
            for size in &row.sample_sizes {
                let cell = match size {
                    Some(n) => n.to_string(),
                    None => format!("> {}", self.search_bound),
                };
                report.push_str(&format!(" {:<15}", cell));
            }
            report.push('\n');
        }
        report.push('\n');

        if let Some(row) = self
            .sample_sizes
            .iter()
            .find(|row| row.label == EffectSize::Medium)
        {
            // Most conservative (largest) requirement across significance levels
            let required = row.sample_sizes.iter().flatten().max();
            if let Some(n) = required {
                report.push_str(&format!(
                    "CONCLUSION: n={} pairs is sufficient for {} power at every tabulated α,\n\
                     assuming a medium effect size (d={}).\n",
                    n,
                    percent(target),
                    row.effect_size
                ));
            }
        }
        report.push_str(&format!("{}\n", heavy));

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grids_reproducible() {
        let config = TableConfig::default();
        assert_eq!(config.paired.sample_sizes, vec![20, 30, 40, 50, 75, 100]);
        assert_eq!(config.paired.effect_sizes, vec![0.3, 0.5, 0.8]);
        assert_eq!(config.paired.alpha, 0.017);
        assert_eq!(config.one_sample.threshold, 0.70);
        assert_eq!(config.one_sample.scenarios.len(), 4);
        assert_eq!(config.sample_size.alphas, vec![0.05, 0.017]);
        assert_eq!(config.replay_trials, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_build_default_tables() {
        let tables = build_power_tables(&TableConfig::default()).unwrap();

        assert_eq!(tables.paired.len(), 6);
        let n50 = tables.paired.iter().find(|row| row.n == 50).unwrap();
        assert!((n50.powers[1] - 0.9088).abs() < 1e-3);

        assert_eq!(tables.one_sample.len(), 4);
        assert!((tables.one_sample[0].effect_size - 0.5).abs() < 1e-9);
        assert!((tables.one_sample[0].power - 0.9088).abs() < 1e-3);

        let medium = &tables.sample_sizes[1];
        assert_eq!(medium.label, EffectSize::Medium);
        assert_eq!(medium.sample_sizes, vec![Some(27), Some(38)]);
    }

    #[test]
    fn test_recommendations_are_computed() {
        let tables = build_power_tables(&TableConfig::default()).unwrap();

        let (n, power, d) = tables.recommended_paired().unwrap();
        assert_eq!(n, 40);
        assert_eq!(d, 0.5);
        assert!(power >= 0.80);

        assert_eq!(tables.recommended_one_sample_mean(), Some(0.80));
    }

    #[test]
    fn test_recommended_paired_is_smallest_n_in_any_order() {
        let config = TableConfig {
            paired: PairedGrid {
                sample_sizes: vec![100, 20, 50],
                effect_sizes: vec![0.5],
                ..PairedGrid::default()
            },
            ..TableConfig::default()
        };
        let tables = build_power_tables(&config).unwrap();

        let (n, power, _) = tables.recommended_paired().unwrap();
        assert_eq!(n, 50);
        assert!((power - 0.9088).abs() < 1e-3);
        assert!(tables.to_report_string().contains("RECOMMENDED: n=50"));
    }

    #[test]
    fn test_unreachable_sample_size_marked() {
        let config = TableConfig {
            sample_size: SampleSizeGrid {
                effect_sizes: vec![0.05],
                alphas: vec![0.05],
                ..SampleSizeGrid::default()
            },
            ..TableConfig::default()
        };
        let tables = build_power_tables(&config).unwrap();

        assert_eq!(tables.sample_sizes[0].sample_sizes, vec![None]);
        assert!(tables.to_report_string().contains("> 1000"));
    }

    #[test]
    fn test_report_string_sections() {
        let report = build_power_tables(&TableConfig::default())
            .unwrap()
            .to_report_string();

        assert!(report.contains("H1: CORRECTNESS"));
        assert!(report.contains("d=0.5 (medium)"));
        assert!(report.contains("H2: RETRIEVAL QUALITY"));
        assert!(report.contains("H3: REPLAYABILITY"));
        assert!(report.contains("SAMPLE SIZE RECOMMENDATIONS FOR TARGET POWER = 80%"));
        assert!(report.contains("RECOMMENDED: n=40"));
        assert!(report.contains("CONCLUSION: n=38"));
    }

    #[test]
    fn test_from_toml_partial() {
        let toml = r#"
            replay_trials = 20

            [paired]
            sample_sizes = [20, 50]
            effect_sizes = [0.5]
            alpha = 0.05

            [one_sample]
            threshold = 0.6
            scenarios = [{ expected_mean = 0.7, assumed_sd = 0.1 }]
        "#;
        let config = TableConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.paired.sample_sizes, vec![20, 50]);
        assert_eq!(config.paired.tail, TailMode::OneTailed);
        assert_eq!(config.one_sample.sample_size, 50);
        assert_eq!(config.one_sample.scenarios.len(), 1);
        assert_eq!(config.sample_size, SampleSizeGrid::default());
        assert_eq!(config.replay_trials, 20);
    }

    #[test]
    fn test_from_toml_two_tailed() {
        let toml = r#"
            [sample_size]
            tail = "two-tailed"
            effect_sizes = [0.5]
            alphas = [0.05]
        "#;
        let config = TableConfig::from_toml_str(toml).unwrap();
        let tables = build_power_tables(&config).unwrap();
        assert_eq!(tables.sample_sizes[0].sample_sizes, vec![Some(34)]);
    }

    #[test]
    fn test_from_toml_rejects_invalid_grid() {
        let toml = r#"
            [paired]
            sample_sizes = [1, 20]
        "#;
        assert!(TableConfig::from_toml_str(toml).is_err());
        assert!(TableConfig::from_toml_str("paired = 3").is_err());
    }
}
