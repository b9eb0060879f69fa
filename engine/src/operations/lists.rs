// Left folds over a comma-separated list of numbers
use serde_json::json;
use shared::models::{CalculationRow, OperationType};
use shared::utils::russian_format::format_number;

use super::validation::list_numbers;
use super::{EvalContext, Evaluation, Operation};
use crate::error::{EngineError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Sum,
    Difference,
    Product,
    Quotient,
}

impl ListKind {
    fn label(&self) -> &'static str {
        match self {
            ListKind::Sum => "Sum",
            ListKind::Difference => "Difference",
            ListKind::Product => "Product",
            ListKind::Quotient => "Quotient",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ListKind::Sum => " + ",
            ListKind::Difference => " - ",
            ListKind::Product => " × ",
            ListKind::Quotient => " / ",
        }
    }

    fn apply(&self, acc: f64, value: f64) -> f64 {
        match self {
            ListKind::Sum => acc + value,
            ListKind::Difference => acc - value,
            ListKind::Product => acc * value,
            ListKind::Quotient => acc / value,
        }
    }

    /// Sum and product start from their identity; the others from the first element.
    pub fn fold(&self, numbers: &[f64]) -> f64 {
        match self {
            ListKind::Sum => numbers.iter().fold(0.0, |acc, n| self.apply(acc, *n)),
            ListKind::Product => numbers.iter().fold(1.0, |acc, n| self.apply(acc, *n)),
            ListKind::Difference | ListKind::Quotient => match numbers.split_first() {
                Some((first, rest)) => rest.iter().fold(*first, |acc, n| self.apply(acc, *n)),
                None => f64::NAN,
            },
        }
    }
}

pub struct ListFold {
    kind: ListKind,
}

impl ListFold {
    pub fn new(kind: ListKind) -> Self {
        Self { kind }
    }
}

impl Operation for ListFold {
    fn operation_type(&self) -> OperationType {
        match self.kind {
            ListKind::Sum => OperationType::SumList,
            ListKind::Difference => OperationType::DiffList,
            ListKind::Product => OperationType::MulList,
            ListKind::Quotient => OperationType::DivList,
        }
    }

    fn validate(&self, row: &CalculationRow, ctx: &EvalContext) -> Result<(), ValidationError> {
        let numbers = list_numbers(row, ctx)?;
        if numbers.is_empty() {
            return Err(ValidationError::EmptyList);
        }
        if self.kind == ListKind::Quotient && numbers.iter().skip(1).any(|n| *n == 0.0) {
            return Err(ValidationError::ZeroDivisor);
        }
        Ok(())
    }

    fn evaluate(&self, row: &CalculationRow, ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let numbers = list_numbers(row, ctx)?;
        if numbers.is_empty() {
            return Err(ValidationError::EmptyList.into());
        }
        let result = self.kind.fold(&numbers);
        let terms: Vec<String> = numbers.iter().map(|n| format_number(*n)).collect();
        Ok(Evaluation::new(
            format!(
                "{}: {} = {}",
                self.kind.label(),
                terms.join(self.kind.symbol()),
                format_number(result)
            ),
            json!({ "numbers": numbers, "result": result }),
        ))
    }
}
