use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker prepended to failed results when they are rendered as text.
pub const ERROR_MARKER: &str = "Error:";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OperationType {
    // Percentages
    #[serde(rename = "percent_of")]
    PercentOf,
    #[serde(rename = "add_percent")]
    AddPercent,
    #[serde(rename = "sub_percent")]
    SubPercent,
    #[serde(rename = "mod")]
    PercentRemainder,
    #[serde(rename = "percent_change_relative")]
    PercentChange,

    // Ratios
    #[serde(rename = "ratio")]
    Ratio,
    #[serde(rename = "relative_ratio")]
    RelativeRatio,
    #[serde(rename = "common_denominator")]
    CommonDenominator,

    // Arithmetic
    #[serde(rename = "quarter_third")]
    QuarterThird,
    #[serde(rename = "sum_comma")]
    SumList,
    #[serde(rename = "diff_comma")]
    DiffList,
    #[serde(rename = "mul_comma")]
    MulList,
    #[serde(rename = "div_comma")]
    DivList,
    #[serde(rename = "chain_calc")]
    Chain,
    #[serde(rename = "simple_calc")]
    SimpleCalc,

    // Time
    #[serde(rename = "add_time")]
    AddTime,
    #[serde(rename = "sub_time")]
    SubTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OperationCategory {
    Percentages,
    Ratios,
    Arithmetic,
    Time,
}

impl OperationCategory {
    pub const ALL: [OperationCategory; 4] = [
        OperationCategory::Percentages,
        OperationCategory::Ratios,
        OperationCategory::Arithmetic,
        OperationCategory::Time,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OperationCategory::Percentages => "Percentage calculations",
            OperationCategory::Ratios => "Ratios",
            OperationCategory::Arithmetic => "Arithmetic operations",
            OperationCategory::Time => "Time operations",
        }
    }
}

impl OperationType {
    pub const ALL: [OperationType; 17] = [
        OperationType::PercentOf,
        OperationType::SubPercent,
        OperationType::AddPercent,
        OperationType::PercentRemainder,
        OperationType::PercentChange,
        OperationType::Ratio,
        OperationType::RelativeRatio,
        OperationType::CommonDenominator,
        OperationType::QuarterThird,
        OperationType::SumList,
        OperationType::DiffList,
        OperationType::MulList,
        OperationType::DivList,
        OperationType::Chain,
        OperationType::SimpleCalc,
        OperationType::AddTime,
        OperationType::SubTime,
    ];

    /// Tag name used for persistence and on the command line.
    pub fn tag(&self) -> &'static str {
        match self {
            OperationType::PercentOf => "percent_of",
            OperationType::AddPercent => "add_percent",
            OperationType::SubPercent => "sub_percent",
            OperationType::PercentRemainder => "mod",
            OperationType::PercentChange => "percent_change_relative",
            OperationType::Ratio => "ratio",
            OperationType::RelativeRatio => "relative_ratio",
            OperationType::CommonDenominator => "common_denominator",
            OperationType::QuarterThird => "quarter_third",
            OperationType::SumList => "sum_comma",
            OperationType::DiffList => "diff_comma",
            OperationType::MulList => "mul_comma",
            OperationType::DivList => "div_comma",
            OperationType::Chain => "chain_calc",
            OperationType::SimpleCalc => "simple_calc",
            OperationType::AddTime => "add_time",
            OperationType::SubTime => "sub_time",
        }
    }

    /// Kebab-case alias accepted alongside the tag name.
    fn alias(&self) -> &'static str {
        match self {
            OperationType::PercentOf => "percent-of",
            OperationType::AddPercent => "add-percent",
            OperationType::SubPercent => "sub-percent",
            OperationType::PercentRemainder => "percent-remainder",
            OperationType::PercentChange => "percent-change",
            OperationType::Ratio => "ratio",
            OperationType::RelativeRatio => "relative-ratio",
            OperationType::CommonDenominator => "common-denominator",
            OperationType::QuarterThird => "quarter-third",
            OperationType::SumList => "sum",
            OperationType::DiffList => "diff",
            OperationType::MulList => "mul",
            OperationType::DivList => "div",
            OperationType::Chain => "chain",
            OperationType::SimpleCalc => "expr",
            OperationType::AddTime => "add-time",
            OperationType::SubTime => "sub-time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OperationType::PercentOf => "Percentage of a number",
            OperationType::SubPercent => "Subtract a percentage",
            OperationType::AddPercent => "Add a percentage",
            OperationType::PercentRemainder => "Remainder after subtracting %",
            OperationType::PercentChange => "Percentage change between numbers",
            OperationType::Ratio => "Ratio",
            OperationType::RelativeRatio => "Direct ratio of shares",
            OperationType::CommonDenominator => "Common divisor",
            OperationType::QuarterThird => "Half, quarter, third and fifth",
            OperationType::SumList => "Sum of comma-separated numbers",
            OperationType::DiffList => "Difference (subtract the rest from the first)",
            OperationType::MulList => "Product of numbers",
            OperationType::DivList => "Division in order",
            OperationType::Chain => "Formula: a → b → c",
            OperationType::SimpleCalc => "Simple arithmetic (800+800+950-250)",
            OperationType::AddTime => "Add time",
            OperationType::SubTime => "Subtract time",
        }
    }

    pub fn category(&self) -> OperationCategory {
        match self {
            OperationType::PercentOf
            | OperationType::SubPercent
            | OperationType::AddPercent
            | OperationType::PercentRemainder
            | OperationType::PercentChange => OperationCategory::Percentages,
            OperationType::Ratio | OperationType::RelativeRatio | OperationType::CommonDenominator => {
                OperationCategory::Ratios
            }
            OperationType::QuarterThird
            | OperationType::SumList
            | OperationType::DiffList
            | OperationType::MulList
            | OperationType::DivList
            | OperationType::Chain
            | OperationType::SimpleCalc => OperationCategory::Arithmetic,
            OperationType::AddTime | OperationType::SubTime => OperationCategory::Time,
        }
    }

    /// How many input fields the operation reads.
    pub fn field_count(&self) -> usize {
        match self {
            OperationType::SumList
            | OperationType::DiffList
            | OperationType::MulList
            | OperationType::DivList
            | OperationType::QuarterThird
            | OperationType::SimpleCalc => 1,
            OperationType::Chain => 3,
            _ => 2,
        }
    }

    /// Labels for the input fields, empty for unused ones.
    pub fn field_labels(&self) -> [&'static str; 3] {
        match self {
            OperationType::PercentOf
            | OperationType::AddPercent
            | OperationType::SubPercent
            | OperationType::PercentRemainder => ["Number", "Percent", ""],
            OperationType::PercentChange => ["Old value", "New value", ""],
            OperationType::Ratio | OperationType::CommonDenominator => {
                ["Numbers (comma separated)", "More numbers (optional)", ""]
            }
            OperationType::RelativeRatio => ["Share", "Base", ""],
            OperationType::QuarterThird => ["Number", "", ""],
            OperationType::SumList
            | OperationType::DiffList
            | OperationType::MulList
            | OperationType::DivList => ["Numbers (comma separated)", "", ""],
            OperationType::Chain => ["a", "Add %", "Subtract %"],
            OperationType::SimpleCalc => ["Expression", "", ""],
            OperationType::AddTime | OperationType::SubTime => ["Time (h:mm)", "Time (h:mm)", ""],
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        OperationType::ALL
            .iter()
            .copied()
            .find(|op| op.tag() == wanted || op.alias() == wanted)
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}

/// Raw user input for one calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculationRow {
    pub value1: String,
    pub value2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value3: Option<String>,
}

impl CalculationRow {
    pub fn new(value1: impl Into<String>, value2: impl Into<String>) -> Self {
        Self {
            value1: value1.into(),
            value2: value2.into(),
            value3: None,
        }
    }

    pub fn with_third(mut self, value3: impl Into<String>) -> Self {
        self.value3 = Some(value3.into());
        self
    }

    pub fn value3_or_empty(&self) -> &str {
        self.value3.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Success { text: String },
    Failure { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    pub operation: OperationType,
    pub input: CalculationRow,
    pub outcome: CalculationOutcome,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl CalculationResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, CalculationOutcome::Success { .. })
    }

    /// Display text; failures carry the error marker in front of the reason.
    pub fn formatted(&self) -> String {
        match &self.outcome {
            CalculationOutcome::Success { text } => text.clone(),
            CalculationOutcome::Failure { reason } => format!("{} {}", ERROR_MARKER, reason),
        }
    }
}
