// Fractions of a number and free-form expressions
use serde_json::json;
use shared::models::{CalculationRow, OperationType};
use shared::utils::russian_format::format_number;

use super::validation::require_number;
use super::{EvalContext, Evaluation, Operation};
use crate::error::{EngineError, Field, ValidationError};
use crate::expression::evaluate_expression;

pub struct QuarterThird;

impl Operation for QuarterThird {
    fn operation_type(&self) -> OperationType {
        OperationType::QuarterThird
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        require_number(&row.value1, Field::First).map(|_| ())
    }

    fn evaluate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let v1 = require_number(&row.value1, Field::First)?;
        let (half, quarter, third, fifth) = (v1 / 2.0, v1 / 4.0, v1 / 3.0, v1 / 5.0);
        Ok(Evaluation::new(
            format!(
                "Half of {} = {}, quarter = {}, third = {}, fifth = {}",
                format_number(v1),
                format_number(half),
                format_number(quarter),
                format_number(third),
                format_number(fifth)
            ),
            json!({ "value1": v1, "half": half, "quarter": quarter, "third": third, "fifth": fifth }),
        ))
    }
}

pub struct SimpleCalc;

impl Operation for SimpleCalc {
    fn operation_type(&self) -> OperationType {
        OperationType::SimpleCalc
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        if row.value1.trim().is_empty() {
            return Err(ValidationError::MissingExpression);
        }
        evaluate_expression(&row.value1)?;
        Ok(())
    }

    fn evaluate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let expression = row.value1.as_str();
        let value = evaluate_expression(expression).map_err(ValidationError::from)?;
        Ok(Evaluation::new(
            format!("{} = {}", expression, format_number(value)),
            json!({ "expression": expression, "result": value }),
        ))
    }
}
