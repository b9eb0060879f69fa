// Batch input files and the persisted history
pub mod batch_parser;
pub mod history_store;

pub use batch_parser::{BatchCsvParser, BatchRow};
pub use history_store::{HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore};
