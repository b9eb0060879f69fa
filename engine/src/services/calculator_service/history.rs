// Handlers for history export
use std::fs;
use std::path::Path;

use crate::data::history_store::HistoryStore;
use crate::error::EngineError;

/// Writes one formatted result per line. Returns how many lines were written.
pub fn handle_write_export<S: HistoryStore + ?Sized>(store: &S, path: &Path) -> Result<usize, EngineError> {
    let lines = store.export_as_text();
    if lines.is_empty() {
        return Err(EngineError::HistoryError("history is empty".to_string()));
    }
    fs::write(path, lines.join("\n"))?;
    tracing::info!(path = %path.display(), entries = lines.len(), "History exported");
    Ok(lines.len())
}
