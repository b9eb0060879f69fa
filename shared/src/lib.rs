pub mod models;
pub mod utils;

pub use models::{CalculationOutcome, CalculationResult, CalculationRow, OperationCategory, OperationType};
