// Engine library root
// Parsing of user input, the operation table, history storage and the calculator service.

pub mod config;
pub mod data;
pub mod error;
pub mod expression;
pub mod operations;
pub mod parsing;
pub mod services;

pub use error::EngineError;
pub use services::CalculatorService;
