use thiserror::Error;

/// Which input field a validation message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    First,
    Second,
    Third,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::First => f.write_str("first"),
            Field::Second => f.write_str("second"),
            Field::Third => f.write_str("third"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("expression contains a forbidden construct: '{0}'")]
    ForbiddenKeyword(String),

    #[error("expression contains invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    #[error("result is not a finite number")]
    NonFinite,

    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} value must be a number")]
    NotANumber(Field),

    #[error("{0} value must be a time as hours:minutes or decimal hours")]
    InvalidTime(Field),

    #[error("at least two numbers are required")]
    TooFewNumbers,

    #[error("zero cannot take part in a ratio")]
    ZeroInRatio,

    #[error("numbers round to zero, no common divisor exists")]
    AllZero,

    #[error("divisor cannot be zero")]
    ZeroDivisor,

    #[error("first number cannot be zero when calculating a percentage change")]
    ZeroBase,

    #[error("enter at least one comma-separated number")]
    EmptyList,

    #[error("could not parse list entries: {}", .0.join(", "))]
    RejectedEntries(Vec<String>),

    #[error("enter an arithmetic expression")]
    MissingExpression,

    #[error("invalid arithmetic expression: {0}")]
    InvalidExpression(#[from] ExpressionError),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("History store error: {0}")]
    HistoryError(String),

    #[error("Batch error: {0}")]
    BatchError(String),
}
