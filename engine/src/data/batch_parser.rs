use anyhow::{anyhow, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::{CalculationRow, OperationType};
use std::fs::File;
use std::io::{BufReader, Read};

/// One input line of a batch file. `operation` overrides the batch operation when present.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub operation: Option<OperationType>,
    pub row: CalculationRow,
}

pub struct BatchCsvParser;

impl BatchCsvParser {
    // CSV Header: operation;value1;value2;value3 (operation, value2 and value3 optional)
    // Example Row: percent_of;1 234,5;10;
    pub fn load_rows_from_csv(file_path: &str, delimiter: u8) -> Result<Vec<BatchRow>> {
        let file = File::open(file_path).map_err(|e| anyhow!("Failed to open batch file '{}': {}", file_path, e))?;
        Self::load_rows_from_reader(BufReader::new(file), delimiter)
    }

    pub fn load_rows_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<BatchRow>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if Self::column(&headers, "value1").is_none() {
            return Err(anyhow!("Batch file must have a 'value1' column"));
        }

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| anyhow!("Error reading batch record at line {}: {}", line, e))?;
            if record.iter().all(|field| field.trim().is_empty()) {
                tracing::debug!(line, "Skipping blank batch line");
                continue;
            }

            let operation = match Self::get_field(&record, &headers, "operation").map(str::trim) {
                Some(tag) if !tag.is_empty() => Some(
                    tag.parse::<OperationType>()
                        .map_err(|e| anyhow!("Error parsing 'operation' at line {}: {}", line, e))?,
                ),
                _ => None,
            };

            let value1 = Self::get_field(&record, &headers, "value1").unwrap_or("");
            let value2 = Self::get_field(&record, &headers, "value2").unwrap_or("");
            let value3 = Self::get_field(&record, &headers, "value3").filter(|v| !v.trim().is_empty());

            rows.push(BatchRow {
                operation,
                row: CalculationRow {
                    value1: value1.to_string(),
                    value2: value2.to_string(),
                    value3: value3.map(str::to_string),
                },
            });
        }
        tracing::info!(rows = rows.len(), "Loaded batch rows");
        Ok(rows)
    }

    fn column(headers: &StringRecord, name: &str) -> Option<usize> {
        headers.iter().position(|header| header.eq_ignore_ascii_case(name))
    }

    // Field by header name; short records yield None for trailing columns.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        Self::column(headers, name).and_then(|pos| record.get(pos))
    }
}
