// Percentage operations: of / add / subtract / remainder / change / a → b → c chain
use serde_json::json;
use shared::models::{CalculationRow, OperationType};
use shared::utils::russian_format::{format_number, format_plain, to_fixed};

use super::validation::{require_number, require_pair};
use super::{EvalContext, Evaluation, Operation};
use crate::error::{EngineError, Field, ValidationError};

fn share(value: f64, percent: f64) -> f64 {
    value * (percent / 100.0)
}

pub struct PercentOf;

impl Operation for PercentOf {
    fn operation_type(&self) -> OperationType {
        OperationType::PercentOf
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        require_pair(row).map(|_| ())
    }

    fn evaluate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let (v1, v2) = require_pair(row)?;
        let result = share(v1, v2);
        Ok(Evaluation::new(
            format!("{} × {}% = {}", format_number(v1), format_plain(v2), format_number(result)),
            json!({ "value1": v1, "value2": v2, "result": result }),
        ))
    }
}

pub struct AddPercent;

impl Operation for AddPercent {
    fn operation_type(&self) -> OperationType {
        OperationType::AddPercent
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        require_pair(row).map(|_| ())
    }

    fn evaluate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let (v1, v2) = require_pair(row)?;
        let result = v1 + share(v1, v2);
        Ok(Evaluation::new(
            format!("{} + {}% = {}", format_number(v1), format_plain(v2), format_number(result)),
            json!({ "value1": v1, "value2": v2, "result": result }),
        ))
    }
}

pub struct SubPercent;

impl Operation for SubPercent {
    fn operation_type(&self) -> OperationType {
        OperationType::SubPercent
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        require_pair(row).map(|_| ())
    }

    fn evaluate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let (v1, v2) = require_pair(row)?;
        let result = v1 - share(v1, v2);
        Ok(Evaluation::new(
            format!("{} - {}% = {}", format_number(v1), format_plain(v2), format_number(result)),
            json!({ "value1": v1, "value2": v2, "result": result }),
        ))
    }
}

pub struct PercentRemainder;

impl Operation for PercentRemainder {
    fn operation_type(&self) -> OperationType {
        OperationType::PercentRemainder
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        require_pair(row).map(|_| ())
    }

    fn evaluate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let (v1, v2) = require_pair(row)?;
        let part = share(v1, v2);
        let rest = v1 - part;
        Ok(Evaluation::new(
            format!(
                "{}% of {} = {}, remainder: {}",
                format_plain(v2),
                format_number(v1),
                format_number(part),
                format_number(rest)
            ),
            json!({ "value1": v1, "value2": v2, "percent": part, "remainder": rest }),
        ))
    }
}

/// Relative change from the first value to the second, as a percentage of the first.
pub struct PercentChange;

impl Operation for PercentChange {
    fn operation_type(&self) -> OperationType {
        OperationType::PercentChange
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        let (v1, _) = require_pair(row)?;
        if v1 == 0.0 {
            return Err(ValidationError::ZeroBase);
        }
        Ok(())
    }

    fn evaluate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let (v1, v2) = require_pair(row)?;
        let diff = v1 - v2;
        let change = diff.abs() / v1 * 100.0;
        let (a, b, c) = (format_number(v1), format_number(v2), to_fixed(change, 2));
        let text = if diff > 0.0 {
            format!("Decrease: ({} - {}) / {} × 100 = {}%", a, b, a, c)
        } else if diff < 0.0 {
            format!("Increase: ({} - {}) / {} × 100 = {}%", b, a, a, c)
        } else {
            "No change (0%)".to_string()
        };
        Ok(Evaluation::new(
            text,
            json!({ "value1": v1, "value2": v2, "difference": diff, "change_percent": change }),
        ))
    }
}

/// a = v1, b = a + v2 %, c = b - v3 %.
pub struct ChainFormula;

impl ChainFormula {
    fn inputs(row: &CalculationRow) -> Result<(f64, f64, f64), ValidationError> {
        let (v1, v2) = require_pair(row)?;
        let v3 = require_number(row.value3_or_empty(), Field::Third)?;
        Ok((v1, v2, v3))
    }
}

impl Operation for ChainFormula {
    fn operation_type(&self) -> OperationType {
        OperationType::Chain
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        Self::inputs(row).map(|_| ())
    }

    fn evaluate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let (v1, v2, v3) = Self::inputs(row)?;
        let a = v1;
        let b = a + share(a, v2);
        let c = b - share(b, v3);
        Ok(Evaluation::new(
            format!(
                "a = {}, b = a + {}% = {}, c = b - {}% = {}",
                format_number(a),
                format_plain(v2),
                format_number(b),
                format_plain(v3),
                format_number(c)
            ),
            json!({ "a": a, "b": b, "c": c, "value2": v2, "value3": v3 }),
        ))
    }
}
