// Adding and subtracting durations
use serde_json::json;
use shared::models::{CalculationRow, OperationType};

use super::validation::require_time;
use super::{EvalContext, Evaluation, Operation};
use crate::error::{EngineError, Field, ValidationError};
use crate::parsing::{format_time, parse_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDirection {
    Add,
    Subtract,
}

pub struct TimeArithmetic {
    direction: TimeDirection,
}

impl TimeArithmetic {
    pub fn new(direction: TimeDirection) -> Self {
        Self { direction }
    }
}

impl Operation for TimeArithmetic {
    fn operation_type(&self) -> OperationType {
        match self.direction {
            TimeDirection::Add => OperationType::AddTime,
            TimeDirection::Subtract => OperationType::SubTime,
        }
    }

    fn validate(&self, row: &CalculationRow, _ctx: &EvalContext) -> Result<(), ValidationError> {
        require_time(&row.value1, Field::First)?;
        require_time(&row.value2, Field::Second)
    }

    fn evaluate(&self, row: &CalculationRow, ctx: &EvalContext) -> Result<Evaluation, EngineError> {
        let (v1, v2) = (row.value1.as_str(), row.value2.as_str());
        let (t1, t2) = (parse_time(v1), parse_time(v2));
        let (total, symbol) = match self.direction {
            TimeDirection::Add => (t1 + t2, '+'),
            TimeDirection::Subtract => (t1 - t2, '-'),
        };
        Ok(Evaluation::new(
            format!("{} {} {} = {}", v1, symbol, v2, format_time(total, &ctx.day_forms)),
            json!({ "minutes1": t1, "minutes2": t2, "total_minutes": total }),
        ))
    }
}
