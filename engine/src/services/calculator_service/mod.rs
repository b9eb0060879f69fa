// engine/src/services/calculator_service/mod.rs
// CalculatorService ties the operations to a history store.
// Row handling and export live in the sibling handler modules.

use std::path::Path;

use shared::models::{CalculationResult, CalculationRow, OperationType};

use crate::config::EngineSettings;
use crate::data::batch_parser::BatchRow;
use crate::data::history_store::HistoryStore;
use crate::error::EngineError;
use crate::operations::EvalContext;

pub mod calculate;
pub mod helpers;
pub mod history;

pub struct CalculatorService<S: HistoryStore> {
    history: S,
    ctx: EvalContext,
}

impl<S: HistoryStore> CalculatorService<S> {
    pub fn new(history: S, settings: &EngineSettings) -> Self {
        CalculatorService {
            history,
            ctx: EvalContext::from(settings),
        }
    }

    /// Evaluates one row without touching the history.
    pub fn calculate(&self, row: &CalculationRow, operation: OperationType) -> CalculationResult {
        calculate::handle_calculate(row, operation, &self.ctx)
    }

    /// Evaluates rows in order; successful results are recorded in the history.
    pub fn calculate_all(&mut self, rows: &[CalculationRow], operation: OperationType) -> Vec<CalculationResult> {
        tracing::info!(operation = %operation, rows = rows.len(), "Calculating rows");
        rows.iter().map(|row| self.calculate_and_record(row, operation)).collect()
    }

    /// Like `calculate_all`, with each row's own operation taking precedence over `default_operation`.
    pub fn calculate_batch(
        &mut self,
        rows: &[BatchRow],
        default_operation: Option<OperationType>,
    ) -> Result<Vec<CalculationResult>, EngineError> {
        let operations = rows
            .iter()
            .enumerate()
            .map(|(idx, batch_row)| {
                batch_row.operation.or(default_operation).ok_or_else(|| {
                    EngineError::BatchError(format!("row {} has no operation and no default was given", idx + 1))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(rows = rows.len(), "Calculating batch");
        Ok(rows
            .iter()
            .zip(operations)
            .map(|(batch_row, operation)| self.calculate_and_record(&batch_row.row, operation))
            .collect())
    }

    fn calculate_and_record(&mut self, row: &CalculationRow, operation: OperationType) -> CalculationResult {
        let result = self.calculate(row, operation);
        if result.is_success() {
            self.history.append(result.clone());
        }
        result
    }

    pub fn history(&self) -> Vec<CalculationResult> {
        self.history.get()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn export_history(&self) -> Vec<String> {
        self.history.export_as_text()
    }

    pub fn write_export(&self, path: &Path) -> Result<usize, EngineError> {
        history::handle_write_export(&self.history, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::history_store::{InMemoryHistoryStore, JsonFileHistoryStore};
    use tempfile::tempdir;

    fn create_test_service() -> CalculatorService<InMemoryHistoryStore> {
        CalculatorService::new(InMemoryHistoryStore::default(), &EngineSettings::default())
    }

    #[test]
    fn test_calculate_does_not_record() {
        let service = create_test_service();
        let result = service.calculate(&CalculationRow::new("200", "10"), OperationType::SubPercent);
        assert_eq!(result.formatted(), "200 - 10% = 180");
        assert!(service.history().is_empty());
    }

    #[test]
    fn test_calculate_all_keeps_order_and_records_successes_only() {
        let mut service = create_test_service();
        let rows = vec![
            CalculationRow::new("1:30", "0:45"),
            CalculationRow::new("1:30", "9:99"),
            CalculationRow::new("25:00", "0:00"),
        ];
        let results = service.calculate_all(&rows, OperationType::AddTime);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].formatted(), "1:30 + 0:45 = 02:15");
        assert!(!results[1].is_success());
        assert_eq!(results[2].formatted(), "25:00 + 0:00 = 01:00 (1 day, 1 h, 0 min)");
        assert_eq!(
            service.export_history(),
            vec![results[0].formatted(), results[2].formatted()]
        );
    }

    #[test]
    fn test_deeply_nested_expression_is_a_failure_result() {
        let mut service = create_test_service();
        let expression = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
        let results = service.calculate_all(&[CalculationRow::new(expression, "")], OperationType::SimpleCalc);
        assert!(!results[0].is_success());
        assert!(results[0].formatted().starts_with("Error: "));
        assert!(service.history().is_empty());
    }

    #[test]
    fn test_repeated_calculation_is_deduplicated() {
        let mut service = create_test_service();
        let rows = vec![CalculationRow::new("12", "18"), CalculationRow::new("12", "18")];
        service.calculate_all(&rows, OperationType::Ratio);
        assert_eq!(service.history().len(), 1);
    }

    #[test]
    fn test_calculate_batch_with_per_row_operations() {
        let mut service = create_test_service();
        let rows = vec![
            BatchRow { operation: Some(OperationType::SimpleCalc), row: CalculationRow::new("2*(3+4)", "") },
            BatchRow { operation: None, row: CalculationRow::new("200", "10") },
        ];
        let results = service.calculate_batch(&rows, Some(OperationType::PercentOf)).unwrap();
        assert_eq!(results[0].formatted(), "2*(3+4) = 14");
        assert_eq!(results[1].formatted(), "200 × 10% = 20");
    }

    #[test]
    fn test_calculate_batch_requires_an_operation() {
        let mut service = create_test_service();
        let rows = vec![BatchRow { operation: None, row: CalculationRow::new("1", "2") }];
        let result = service.calculate_batch(&rows, None);
        assert!(matches!(result, Err(EngineError::BatchError(_))));
        assert!(service.history().is_empty());
    }

    #[test]
    fn test_clear_history() {
        let mut service = create_test_service();
        service.calculate_all(&[CalculationRow::new("1, 2", "")], OperationType::SumList);
        assert_eq!(service.history().len(), 1);
        service.clear_history();
        assert!(service.history().is_empty());
    }

    #[test]
    fn test_service_with_file_store() {
        let dir = tempdir().unwrap();
        let settings = EngineSettings {
            history_path: dir.path().join("history.json"),
            ..EngineSettings::default()
        };
        let store = JsonFileHistoryStore::new(&settings.history_path, settings.history_limit);
        let mut service = CalculatorService::new(store, &settings);
        service.calculate_all(&[CalculationRow::new("100", "10").with_third("5")], OperationType::Chain);

        let reopened = JsonFileHistoryStore::new(&settings.history_path, None);
        assert_eq!(
            reopened.export_as_text(),
            vec!["a = 100, b = a + 10% = 110, c = b - 5% = 104,5".to_string()]
        );
        assert!(reopened.get()[0].is_success());
    }
}
