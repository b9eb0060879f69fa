// Calculation operations module
pub mod arithmetic;
pub mod lists;
pub mod percent;
pub mod ratio;
pub mod time_ops;
pub mod validation;

use serde_json::Value;
use shared::models::{CalculationRow, OperationType};

use crate::config::{DayForms, EngineSettings, ListPolicy};
use crate::error::{EngineError, ValidationError};

/// Settings an operation may consult while validating or evaluating.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    pub list_policy: ListPolicy,
    pub day_forms: DayForms,
}

impl From<&EngineSettings> for EvalContext {
    fn from(settings: &EngineSettings) -> Self {
        EvalContext {
            list_policy: settings.list_policy,
            day_forms: settings.day_forms.clone(),
        }
    }
}

/// Successful evaluation: display text plus the numbers behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub text: String,
    pub parameters: Value,
}

impl Evaluation {
    pub fn new(text: String, parameters: Value) -> Self {
        Self { text, parameters }
    }
}

// Common trait for all operations
pub trait Operation: Send + Sync {
    fn operation_type(&self) -> OperationType;

    /// Gate run before `evaluate`; a failure means `evaluate` is never called.
    fn validate(&self, row: &CalculationRow, ctx: &EvalContext) -> Result<(), ValidationError>;

    fn evaluate(&self, row: &CalculationRow, ctx: &EvalContext) -> Result<Evaluation, EngineError>;
}

pub fn operation_for(op: OperationType) -> Box<dyn Operation> {
    match op {
        OperationType::PercentOf => Box::new(percent::PercentOf),
        OperationType::AddPercent => Box::new(percent::AddPercent),
        OperationType::SubPercent => Box::new(percent::SubPercent),
        OperationType::PercentRemainder => Box::new(percent::PercentRemainder),
        OperationType::PercentChange => Box::new(percent::PercentChange),
        OperationType::Chain => Box::new(percent::ChainFormula),
        OperationType::Ratio => Box::new(ratio::Ratio),
        OperationType::RelativeRatio => Box::new(ratio::RelativeRatio),
        OperationType::CommonDenominator => Box::new(ratio::CommonDivisor),
        OperationType::SumList => Box::new(lists::ListFold::new(lists::ListKind::Sum)),
        OperationType::DiffList => Box::new(lists::ListFold::new(lists::ListKind::Difference)),
        OperationType::MulList => Box::new(lists::ListFold::new(lists::ListKind::Product)),
        OperationType::DivList => Box::new(lists::ListFold::new(lists::ListKind::Quotient)),
        OperationType::QuarterThird => Box::new(arithmetic::QuarterThird),
        OperationType::SimpleCalc => Box::new(arithmetic::SimpleCalc),
        OperationType::AddTime => Box::new(time_ops::TimeArithmetic::new(time_ops::TimeDirection::Add)),
        OperationType::SubTime => Box::new(time_ops::TimeArithmetic::new(time_ops::TimeDirection::Subtract)),
    }
}

/// Validates and evaluates `row` with the operation selected by `op`.
pub fn run(op: OperationType, row: &CalculationRow, ctx: &EvalContext) -> Result<Evaluation, EngineError> {
    let operation = operation_for(op);
    if let Err(e) = operation.validate(row, ctx) {
        tracing::debug!(operation = %op, error = %e, "Input rejected before evaluation");
        return Err(e.into());
    }
    operation.evaluate(row, ctx)
}
