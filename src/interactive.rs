//! Interactive power calculator prompt
//!
//! Thin adapter that reads sample size, effect size and alpha from a line
//! reader. All computation happens in [`crate::power::recommend`].

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Parameters read from the prompt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorInput {
    pub n: usize,
    pub d: f64,
    pub alpha: f64,
}

/// Prompt for n, d and alpha
///
/// A blank alpha selects `default_alpha`. Returns `Ok(None)` when input ends
/// or a value does not parse, which ends the calculator.
pub fn prompt_parameters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_alpha: f64,
) -> Result<Option<CalculatorInput>> {
    let Some(n) = prompt_value::<usize, _, _>(input, output, "Enter sample size (n): ", None)?
    else {
        return Ok(None);
    };

    let Some(d) = prompt_value::<f64, _, _>(
        input,
        output,
        "Enter expected Cohen's d effect size: ",
        None,
    )?
    else {
        return Ok(None);
    };

    let alpha_prompt = format!(
        "Enter alpha (default {} for Bonferroni): ",
        default_alpha
    );
    let Some(alpha) = prompt_value::<f64, _, _>(input, output, &alpha_prompt, Some(default_alpha))?
    else {
        return Ok(None);
    };

    Ok(Some(CalculatorInput { n, d, alpha }))
}

fn prompt_value<T, R, W>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: Option<T>,
) -> Result<Option<T>>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", prompt).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read input")? == 0 {
        tracing::debug!("Input ended at prompt {:?}", prompt);
        return Ok(None);
    }

    let value = line.trim();
    if value.is_empty() {
        return Ok(default);
    }

    match value.parse::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => {
            tracing::debug!("Could not parse {:?} at prompt {:?}", value, prompt);
            Ok(None)
        }
    }
}
