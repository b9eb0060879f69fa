// Engine configuration
pub mod settings;

pub use settings::{DayForms, EngineSettings, ListPolicy};
