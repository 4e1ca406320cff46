//! evalstats - Statistical analysis for experiment evaluation
//!
//! This library provides two independent analysis pipelines:
//! - [`replay`]: summarizes replay-experiment trials into descriptive statistics
//!   and a pass/fail determinism verdict
//! - [`power`]: statistical power and required sample sizes for paired and
//!   one-sample t-tests under a noncentral-t model

pub mod cli;
pub mod interactive;
pub mod power;
pub mod replay;
