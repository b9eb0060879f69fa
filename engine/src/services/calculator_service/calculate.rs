// Handler turning one input row into a CalculationResult
use chrono::Utc;
use shared::models::{CalculationOutcome, CalculationResult, CalculationRow, OperationType};

use super::helpers::{input_parameters, merge_parameters};
use crate::operations::{self, EvalContext};

/// Never fails: validation and evaluation errors become a `Failure` outcome.
pub fn handle_calculate(row: &CalculationRow, operation: OperationType, ctx: &EvalContext) -> CalculationResult {
    let (outcome, parameters) = match operations::run(operation, row, ctx) {
        Ok(evaluation) => {
            tracing::debug!(operation = %operation, result = %evaluation.text, "Calculation succeeded");
            (
                CalculationOutcome::Success { text: evaluation.text },
                merge_parameters(row, evaluation.parameters),
            )
        }
        Err(e) => {
            tracing::warn!(operation = %operation, value1 = %row.value1, error = %e, "Calculation failed");
            (CalculationOutcome::Failure { reason: e.to_string() }, input_parameters(row))
        }
    };

    CalculationResult {
        operation,
        input: row.clone(),
        outcome,
        parameters,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result() {
        let ctx = EvalContext::default();
        let result = handle_calculate(&CalculationRow::new("200", "10"), OperationType::PercentOf, &ctx);
        assert!(result.is_success());
        assert_eq!(result.formatted(), "200 × 10% = 20");
        assert_eq!(result.parameters["result"], 20.0);
        assert_eq!(result.parameters["input_value2"], "10");
    }

    #[test]
    fn test_validation_failure_result() {
        let ctx = EvalContext::default();
        let result = handle_calculate(&CalculationRow::new("5", ""), OperationType::Ratio, &ctx);
        assert_eq!(
            result.outcome,
            CalculationOutcome::Failure { reason: "at least two numbers are required".to_string() }
        );
        assert_eq!(result.formatted(), "Error: at least two numbers are required");
    }

    #[test]
    fn test_expression_failure_result() {
        let ctx = EvalContext::default();
        let result = handle_calculate(&CalculationRow::new("window", ""), OperationType::SimpleCalc, &ctx);
        assert!(!result.is_success());
        assert!(result.formatted().starts_with("Error: invalid arithmetic expression"));
    }

    #[test]
    fn test_same_input_same_text_different_timestamp_allowed() {
        let ctx = EvalContext::default();
        let row = CalculationRow::new("1:30", "0:45");
        let first = handle_calculate(&row, OperationType::AddTime, &ctx);
        let second = handle_calculate(&row, OperationType::AddTime, &ctx);
        assert_eq!(first.formatted(), second.formatted());
        assert!(second.timestamp >= first.timestamp);
    }
}
