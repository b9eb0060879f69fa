// Helper functions for calculator_service handlers
use serde_json::{json, Map, Value};
use shared::models::CalculationRow;

/// Raw inputs as recorded on every result.
pub fn input_parameters(row: &CalculationRow) -> Value {
    json!({
        "value1": row.value1,
        "value2": row.value2,
        "value3": row.value3,
    })
}

/// Raw inputs with the evaluation's own parameters layered on top.
pub fn merge_parameters(row: &CalculationRow, computed: Value) -> Value {
    let mut merged = Map::new();
    if let Value::Object(inputs) = input_parameters(row) {
        merged.extend(inputs.into_iter().map(|(k, v)| (format!("input_{}", k), v)));
    }
    match computed {
        Value::Object(values) => merged.extend(values),
        Value::Null => {}
        other => {
            merged.insert("result".to_string(), other);
        }
    }
    Value::Object(merged)
}
