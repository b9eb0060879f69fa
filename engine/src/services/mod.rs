// Services exposed by the engine
pub mod calculator_service;

pub use calculator_service::CalculatorService;
