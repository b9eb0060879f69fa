// Ratio reduction by greatest common divisor
use serde_json::json;
use shared::models::{CalculationRow, OperationType};
use shared::utils::russian_format::{format_number, format_plain, to_fixed};

use super::validation::{all_numbers, require_pair};
use super::{EvalContext, Evaluation, Operation};
use crate::error::{EngineError, ValidationError};

/// Euclid on absolute values. `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let rest = a % b;
        a = b;
        b = rest;
    }
    a
}

/// Rounds to the nearest integer and drops the sign.
fn rounded_abs(value: f64) -> i64 {
    (value.round() as i64).saturating_abs()
}

/// Divisor of all rounded values plus each value divided by it.
fn reduce(numbers: &[f64]) -> Result<(u64, Vec<u64>), ValidationError> {
    let rounded: Vec<i64> = numbers.iter().map(|n| rounded_abs(*n)).collect();
    let divisor = rounded.iter().fold(0u64, |acc, n| gcd(acc as i64, *n));
    if divisor == 0 {
        return Err(ValidationError::AllZero);
    }
    let quotients = rounded.iter().map(|n| *n as u64 / divisor).collect();
    Ok((divisor, quotients))
}

fn join<T: ToString>(items: &[T], separator: &str) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(separator)
}

/// Renders "Ratio 12 : 18 = 2 : 3". Needs at least two numbers.
pub fn calculate_ratio(numbers: &[f64]) -> Result<String, ValidationError> {
    if numbers.len() < 2 {
        return Err(ValidationError::TooFewNumbers);
    }
    let (_, simplified) = reduce(numbers)?;
    let originals: Vec<String> = numbers.iter().map(|n| format_number(*n)).collect();
    Ok(format!("Ratio {} = {}", originals.join(" : "), join(&simplified, " : ")))
}

pub struct Ratio;

impl Operation for Ratio {
    fn operation_type(&self) -> OperationType {
        OperationType::Ratio
    }

    fn validate(&self, row: &CalculationRow, ctx: &EvalContext) -> Result<(), ValidationError> {
        let numbers = all_numbers(row, ctx)?;
        if numbers.len() < 2 {
            return Err(ValidationError::TooFewNumbers);
        }
        if numbers.contains(&0.0) {
            return Err(ValidationError::ZeroInRatio);
        }
        Ok(())
    }

    fn evaluate(&self, row: &CalculationRow, ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let numbers = all_numbers(row, ctx)?;
        let text = calculate_ratio(&numbers)?;
        Ok(Evaluation::new(text, json!({ "numbers": numbers })))
    }
}

/// v1 / v2 expressed as "x : 1".
pub struct RelativeRatio;

impl Operation for RelativeRatio {
    fn operation_type(&self) -> OperationType {
        OperationType::RelativeRatio
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        let (_, v2) = require_pair(row)?;
        if v2 == 0.0 {
            return Err(ValidationError::ZeroDivisor);
        }
        Ok(())
    }

    fn evaluate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let (v1, v2) = require_pair(row)?;
        let ratio = v1 / v2;
        Ok(Evaluation::new(
            format!("Ratio of shares: {} / {} = {} : 1", format_number(v1), format_number(v2), to_fixed(ratio, 2)),
            json!({ "value1": v1, "value2": v2, "ratio": ratio }),
        ))
    }
}

// Tagged `common_denominator`, but what it reports is the greatest common
// divisor of the rounded inputs and the quotients after dividing by it.
pub struct CommonDivisor;

impl Operation for CommonDivisor {
    fn operation_type(&self) -> OperationType {
        OperationType::CommonDenominator
    }

    fn validate(&self, row: &CalculationRow, ctx: &EvalContext) -> Result<(), ValidationError> {
        let numbers = all_numbers(row, ctx)?;
        if numbers.len() < 2 {
            return Err(ValidationError::TooFewNumbers);
        }
        reduce(&numbers).map(|_| ())
    }

    fn evaluate(&self, row: &CalculationRow, ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let numbers = all_numbers(row, ctx)?;
        if numbers.len() < 2 {
            return Err(ValidationError::TooFewNumbers.into());
        }
        let (divisor, quotients) = reduce(&numbers)?;
        let rounded: Vec<String> = numbers.iter().map(|n| format_plain(rounded_abs(*n) as f64)).collect();
        Ok(Evaluation::new(
            format!(
                "{} is the common divisor for {}; after reduction: {}",
                divisor,
                rounded.join(", "),
                join(&quotients, ", ")
            ),
            json!({ "numbers": numbers, "divisor": divisor, "quotients": quotients }),
        ))
    }
}
